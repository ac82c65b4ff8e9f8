use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tripwise_core::domain::plan::TravelPlan;
use tripwise_core::render::cards::{CardKind, ImageKey};
use tripwise_core::render::ViewState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ImageProbe {
    http: reqwest::Client,
}

impl ImageProbe {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .context("failed to build image probe http client")?;
        Ok(Self { http })
    }

    /// True when the URL answers with a success status and, if it says what
    /// it is, claims to be an image.
    pub async fn loads(&self, url: &str) -> bool {
        let res = match self.http.get(url).send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::debug!(%url, error = %e, "image request failed");
                return false;
            }
        };
        if !res.status().is_success() {
            tracing::debug!(%url, status = %res.status(), "image not available");
            return false;
        }
        match res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            Some(kind) => kind.starts_with("image/"),
            None => true,
        }
    }

    // Slots already marked failed are never probed again.
    pub async fn check_plan(&self, plan: &TravelPlan, view: &mut ViewState) -> usize {
        let slots = image_slots(plan);
        let mut failed = 0;
        for (key, url) in slots {
            if view.image_failed(key) {
                continue;
            }
            if !self.loads(url).await && view.mark_image_failed(key) {
                failed += 1;
            }
        }
        if failed > 0 {
            tracing::info!(failed, "images replaced with placeholders");
        }
        failed
    }
}

fn image_slots(plan: &TravelPlan) -> Vec<(ImageKey, &str)> {
    let places = plan.places.iter().map(|p| p.image_url.as_deref());
    let restaurants = plan.restaurants.iter().map(|r| r.image_url.as_deref());
    let hotels = plan.hotels.iter().map(|h| h.image_url.as_deref());

    let mut slots = Vec::new();
    for (kind, urls) in [
        (CardKind::Place, places.collect::<Vec<_>>()),
        (CardKind::Restaurant, restaurants.collect()),
        (CardKind::Hotel, hotels.collect()),
    ] {
        for (index, url) in urls.into_iter().enumerate() {
            if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
                slots.push((ImageKey { kind, index }, url));
            }
        }
    }
    slots
}
