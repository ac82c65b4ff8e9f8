use crate::domain::plan::{Activity, ItineraryDay};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    pub time: String,
    pub title: String,
    pub description: String,
    pub meta: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealCell {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub heading: String,
    pub estimated_cost: Option<String>,
    pub activities: Vec<ActivityItem>,
    pub meals: [MealCell; 3],
    pub tips: Option<String>,
}

pub fn day_cards(days: &[ItineraryDay]) -> Vec<DayCard> {
    days.iter().map(day_card).collect()
}

fn day_card(day: &ItineraryDay) -> DayCard {
    let heading = if day.title.trim().is_empty() {
        format!("Day {}", day.day)
    } else {
        format!("Day {}: {}", day.day, day.title.trim())
    };

    DayCard {
        heading,
        estimated_cost: (!day.estimated_cost.trim().is_empty())
            .then(|| format!("Estimated Cost: {}", day.estimated_cost.trim())),
        activities: day.activities.iter().map(activity_item).collect(),
        meals: [
            MealCell {
                label: "Breakfast",
                value: day.meals.breakfast.clone(),
            },
            MealCell {
                label: "Lunch",
                value: day.meals.lunch.clone(),
            },
            MealCell {
                label: "Dinner",
                value: day.meals.dinner.clone(),
            },
        ],
        tips: day
            .tips
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    }
}

fn activity_item(activity: &Activity) -> ActivityItem {
    ActivityItem {
        time: activity.time.clone(),
        title: activity.activity.clone(),
        description: activity.description.clone(),
        meta: [&activity.location, &activity.duration, &activity.cost]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::Meals;

    #[test]
    fn renders_activities_meals_and_tips() {
        let day = ItineraryDay {
            day: 2,
            title: "Old Town".to_string(),
            activities: vec![Activity {
                time: "9:00 AM".to_string(),
                activity: "Castle walk".to_string(),
                description: "Ramparts and views".to_string(),
                location: "Castle Hill".to_string(),
                duration: "".to_string(),
                cost: "$15".to_string(),
            }],
            meals: Meals {
                breakfast: "Cafe A".to_string(),
                lunch: "Bistro B".to_string(),
                dinner: "Tavern C".to_string(),
            },
            estimated_cost: "$120-180".to_string(),
            tips: Some("Wear good shoes".to_string()),
        };

        let card = day_cards(&[day]).remove(0);
        assert_eq!(card.heading, "Day 2: Old Town");
        assert_eq!(card.estimated_cost.as_deref(), Some("Estimated Cost: $120-180"));
        assert_eq!(card.activities[0].time, "9:00 AM");
        assert_eq!(card.activities[0].meta, vec!["Castle Hill", "$15"]);
        let labels: Vec<_> = card.meals.iter().map(|m| m.label).collect();
        assert_eq!(labels, ["Breakfast", "Lunch", "Dinner"]);
        assert_eq!(card.meals[2].value, "Tavern C");
        assert_eq!(card.tips.as_deref(), Some("Wear good shoes"));
    }

    #[test]
    fn blank_tips_and_title_are_omitted() {
        let day = ItineraryDay {
            day: 1,
            tips: Some(String::new()),
            ..Default::default()
        };
        let card = day_cards(&[day]).remove(0);
        assert_eq!(card.heading, "Day 1");
        assert!(card.tips.is_none());
        assert!(card.estimated_cost.is_none());
        assert!(card.activities.is_empty());
    }

    #[test]
    fn keeps_producer_order() {
        let days: Vec<_> = [3, 1, 2]
            .into_iter()
            .map(|day| ItineraryDay {
                day,
                ..Default::default()
            })
            .collect();
        let headings: Vec<_> = day_cards(&days).into_iter().map(|c| c.heading).collect();
        assert_eq!(headings, ["Day 3", "Day 1", "Day 2"]);
    }
}
