use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPlan {
    #[serde(deserialize_with = "lenient::or_default")]
    pub travel_details: TravelDetails,
    #[serde(deserialize_with = "lenient::or_default")]
    pub places: Vec<Place>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub restaurants: Vec<Restaurant>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub hotels: Vec<Hotel>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(deserialize_with = "lenient::breakdown")]
    pub budget_breakdown: Option<BudgetBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub destination: String,
    #[serde(deserialize_with = "lenient::count")]
    pub duration: u32,
    #[serde(deserialize_with = "lenient::number")]
    pub budget: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub travelers: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub travel_type: String,
    #[serde(deserialize_with = "lenient::tags")]
    pub interests: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub overview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub how_to_reach: String,
    #[serde(deserialize_with = "lenient::text")]
    pub best_time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub entry_fee: String,
    #[serde(deserialize_with = "lenient::number")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub tips: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub maps_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cuisine: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub budget_level: String,
    #[serde(deserialize_with = "lenient::text")]
    pub avg_cost_per_person: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::number")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient::tags")]
    pub specialties: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub atmosphere: String,
    #[serde(deserialize_with = "lenient::text")]
    pub best_time: String,
    #[serde(deserialize_with = "lenient::opt_flag")]
    pub reservation_needed: Option<bool>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub maps_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub price_per_night: String,
    #[serde(deserialize_with = "lenient::text")]
    pub total_estimated: String,
    #[serde(deserialize_with = "lenient::number")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient::tags")]
    pub amenities: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub room_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub proximity: String,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub booking_tip: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub maps_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub activity: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cost: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meals {
    #[serde(deserialize_with = "lenient::text")]
    pub breakfast: String,
    #[serde(deserialize_with = "lenient::text")]
    pub lunch: String,
    #[serde(deserialize_with = "lenient::text")]
    pub dinner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryDay {
    #[serde(deserialize_with = "lenient::count")]
    pub day: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub activities: Vec<Activity>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub meals: Meals,
    #[serde(deserialize_with = "lenient::text")]
    pub estimated_cost: String,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub tips: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetBreakdown {
    #[serde(deserialize_with = "lenient::number")]
    pub accommodation: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub food: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub activities: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub transportation: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub miscellaneous: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total_estimated: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub user_budget: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub remaining: f64,
    #[serde(deserialize_with = "lenient::flag")]
    pub within_budget: bool,
}

impl BudgetBreakdown {
    pub fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("Accommodation", self.accommodation),
            ("Food & Dining", self.food),
            ("Activities & Attractions", self.activities),
            ("Transportation", self.transportation),
            ("Miscellaneous", self.miscellaneous),
        ]
    }
}

mod lenient {
    use super::BudgetBreakdown;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    const BREAKDOWN_KEYS: [&str; 9] = [
        "accommodation",
        "food",
        "activities",
        "transportation",
        "miscellaneous",
        "total_estimated",
        "user_budget",
        "remaining",
        "within_budget",
    ];

    pub fn or_default<'de, D, T>(de: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
    }

    // An object carrying none of the breakdown fields is the producer's
    // placeholder for "not computed".
    pub fn breakdown<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<BudgetBreakdown>, D::Error> {
        match Value::deserialize(de)? {
            Value::Null => Ok(None),
            Value::Object(map) if !BREAKDOWN_KEYS.iter().any(|k| map.contains_key(*k)) => {
                Ok(None)
            }
            value => BudgetBreakdown::deserialize(value)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(de)?;
        match &value {
            Value::Null => Ok(false),
            _ => parse_flag(&value)
                .ok_or_else(|| D::Error::custom(format!("expected a boolean, got {value}"))),
        }
    }

    pub fn opt_flag<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
        Ok(parse_flag(&Value::deserialize(de)?))
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(de)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    fn parse_flag(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" => Some(true),
                "false" | "no" | "n" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn number<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        match Value::deserialize(de)? {
            Value::Null => Ok(0.0),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| D::Error::custom(format!("number out of range: {n}"))),
            Value::String(s) => parse_amount(&s)
                .ok_or_else(|| D::Error::custom(format!("expected a number, got {s:?}"))),
            other => Err(D::Error::custom(format!("expected a number, got {other}"))),
        }
    }

    pub fn count<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(de)?;
        let n = match &value {
            Value::Null => return Ok(0),
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_amount(s),
            _ => None,
        };
        match n {
            Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
            _ => Err(D::Error::custom(format!(
                "expected a non-negative whole number, got {value}"
            ))),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        let value = Value::deserialize(de)?;
        scalar_text(value).map_err(D::Error::custom)
    }

    pub fn tags<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
        match Value::deserialize(de)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(|v| scalar_text(v).map_err(D::Error::custom))
                .collect(),
            Value::String(s) => Ok(vec![s]),
            other => Err(D::Error::custom(format!("expected a list of strings, got {other}"))),
        }
    }

    fn scalar_text(value: Value) -> Result<String, String> {
        match value {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(format!("expected a string, got {other}")),
        }
    }

    fn parse_amount(s: &str) -> Option<f64> {
        let cleaned: String = s
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        if cleaned.is_empty() {
            return Some(0.0);
        }
        cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}
