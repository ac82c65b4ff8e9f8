use crate::domain::plan::{Hotel, Place, Restaurant};
use crate::render::ViewState;

pub const PLACE_PLACEHOLDER: &str = "https://source.unsplash.com/800x600/?landmark,tourism";
pub const RESTAURANT_PLACEHOLDER: &str = "https://source.unsplash.com/800x600/?food,restaurant";
pub const HOTEL_PLACEHOLDER: &str = "https://source.unsplash.com/800x600/?hotel,luxury";

/// Amenity badges shown per hotel card. The hotel keeps all of them.
pub const AMENITY_BADGE_LIMIT: usize = 6;

pub const MAPS_LINK_LABEL: &str = "View on Maps";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CardKind {
    Place,
    Restaurant,
    Hotel,
}

impl CardKind {
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Place => PLACE_PLACEHOLDER,
            Self::Restaurant => RESTAURANT_PLACEHOLDER,
            Self::Hotel => HOTEL_PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageKey {
    pub kind: CardKind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub key: ImageKey,
    pub src: String,
    pub alt: String,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup {
    pub heading: &'static str,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLink {
    pub href: String,
    pub label: &'static str,
    pub new_context: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub image: ImageView,
    pub title: String,
    pub badge: Option<String>,
    pub rating_line: String,
    pub description: String,
    pub details: Vec<DetailRow>,
    pub tags: Option<TagGroup>,
    pub notes: Vec<String>,
    pub tip: Option<String>,
    pub maps: Option<MapLink>,
}

pub fn place_cards(places: &[Place], view: &ViewState) -> Vec<Card> {
    places
        .iter()
        .enumerate()
        .map(|(index, place)| Card {
            image: image_view(CardKind::Place, index, place.image_url.as_deref(), &place.name, view),
            title: place.name.clone(),
            badge: non_blank(&place.category),
            rating_line: rating(place.rating),
            description: place.description.clone(),
            details: detail_rows([
                ("Location", &place.location),
                ("Getting there", &place.how_to_reach),
                ("Best time", &place.best_time),
                ("Duration", &place.duration),
                ("Entry fee", &place.entry_fee),
            ]),
            tags: None,
            notes: Vec::new(),
            tip: place.tips.as_deref().and_then(non_blank),
            maps: map_link(place.maps_link.as_deref()),
        })
        .collect()
}

pub fn restaurant_cards(restaurants: &[Restaurant], view: &ViewState) -> Vec<Card> {
    restaurants
        .iter()
        .enumerate()
        .map(|(index, restaurant)| {
            let rating_line = match non_blank(&restaurant.cuisine) {
                Some(cuisine) => format!("{cuisine} • {}", rating(restaurant.rating)),
                None => rating(restaurant.rating),
            };
            let notes = if restaurant.reservation_needed == Some(true) {
                vec!["Reservation recommended".to_string()]
            } else {
                Vec::new()
            };

            Card {
                image: image_view(
                    CardKind::Restaurant,
                    index,
                    restaurant.image_url.as_deref(),
                    &restaurant.name,
                    view,
                ),
                title: restaurant.name.clone(),
                badge: non_blank(&restaurant.budget_level),
                rating_line,
                description: restaurant.description.clone(),
                details: detail_rows([
                    ("Price", &restaurant.avg_cost_per_person),
                    ("Atmosphere", &restaurant.atmosphere),
                    ("Best time", &restaurant.best_time),
                    ("Location", &restaurant.location),
                ]),
                tags: tag_group("Must Try", &restaurant.specialties, usize::MAX),
                notes,
                tip: None,
                maps: map_link(restaurant.maps_link.as_deref()),
            }
        })
        .collect()
}

pub fn hotel_cards(hotels: &[Hotel], view: &ViewState) -> Vec<Card> {
    hotels
        .iter()
        .enumerate()
        .map(|(index, hotel)| Card {
            image: image_view(CardKind::Hotel, index, hotel.image_url.as_deref(), &hotel.name, view),
            title: hotel.name.clone(),
            badge: non_blank(&hotel.category),
            rating_line: rating(hotel.rating),
            description: hotel.description.clone(),
            details: detail_rows([
                ("Per Night", &hotel.price_per_night),
                ("Total", &hotel.total_estimated),
                ("Room", &hotel.room_type),
                ("Location", &hotel.location),
                ("Nearby", &hotel.proximity),
            ]),
            tags: tag_group("Amenities", &hotel.amenities, AMENITY_BADGE_LIMIT),
            notes: Vec::new(),
            tip: hotel.booking_tip.as_deref().and_then(non_blank),
            maps: map_link(hotel.maps_link.as_deref()),
        })
        .collect()
}

fn image_view(
    kind: CardKind,
    index: usize,
    url: Option<&str>,
    alt: &str,
    view: &ViewState,
) -> ImageView {
    let key = ImageKey { kind, index };
    let usable = url.and_then(non_blank).filter(|_| !view.image_failed(key));
    let is_placeholder = usable.is_none();

    ImageView {
        key,
        src: usable.unwrap_or_else(|| kind.placeholder().to_string()),
        alt: alt.to_string(),
        is_placeholder,
    }
}

fn rating(value: f64) -> String {
    format!("Rating: {value}/5.0")
}

fn detail_rows<const N: usize>(rows: [(&'static str, &String); N]) -> Vec<DetailRow> {
    rows.into_iter()
        .filter_map(|(label, value)| non_blank(value).map(|value| DetailRow { label, value }))
        .collect()
}

fn tag_group(heading: &'static str, tags: &[String], limit: usize) -> Option<TagGroup> {
    let badges: Vec<String> = tags.iter().filter_map(|t| non_blank(t)).take(limit).collect();
    if badges.is_empty() {
        return None;
    }
    Some(TagGroup { heading, badges })
}

fn map_link(href: Option<&str>) -> Option<MapLink> {
    href.and_then(non_blank).map(|href| MapLink {
        href,
        label: MAPS_LINK_LABEL,
        new_context: true,
    })
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
