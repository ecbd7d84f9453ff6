//! Page-level data loaders.
//!
//! A page never fails because the CMS is down: every loader absorbs fetch
//! errors and hands back an empty section instead.

use crate::constants::{
    page_endpoint, BENEFITS_ENDPOINT, EVENTS_ENDPOINT, GAME_MENU_ENDPOINT, MAIN_MENU_ENDPOINT,
    PRODUCTS_ENDPOINT, TEAM_ENDPOINT, VACANCIES_ENDPOINT,
};
use crate::content::{
    Benefit, Event, InteriorGallery, MenuItem, Product, ProductType, TeamMember, Vacancy,
};
use crate::error::Result;
use crate::gateway::{ContentGateway, FetchOptions};
use serde::{Deserialize, Serialize};
use tracing::error;

const MENU_PAGE_SIZE: u32 = 100;
const LISTING_PAGE_SIZE: u32 = 50;

fn or_empty<T>(section: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!(section, error = %e, "Error fetching {}, rendering empty section", section);
        Vec::new()
    })
}

pub async fn products(
    gateway: &ContentGateway,
    product_type: Option<ProductType>,
    per_page: Option<u32>,
) -> Vec<Product> {
    let options = FetchOptions::embedded().with_per_page(per_page);
    let products = or_empty(
        "products",
        gateway.fetch_collection::<Product>(PRODUCTS_ENDPOINT, &options).await,
    );
    match product_type {
        Some(wanted) => products
            .into_iter()
            .filter(|p| p.product_type == Some(wanted))
            .collect(),
        None => products,
    }
}

pub async fn main_menu(gateway: &ContentGateway) -> Vec<MenuItem> {
    or_empty(
        "main menu",
        gateway
            .fetch_collection(MAIN_MENU_ENDPOINT, &FetchOptions::per_page(MENU_PAGE_SIZE))
            .await,
    )
}

pub async fn game_menu(gateway: &ContentGateway) -> Vec<MenuItem> {
    or_empty(
        "game menu",
        gateway
            .fetch_collection(GAME_MENU_ENDPOINT, &FetchOptions::per_page(MENU_PAGE_SIZE))
            .await,
    )
}

pub async fn events(gateway: &ContentGateway) -> Vec<Event> {
    or_empty(
        "events",
        gateway
            .fetch_collection(EVENTS_ENDPOINT, &FetchOptions::embedded())
            .await,
    )
}

pub async fn event_by_slug(gateway: &ContentGateway, slug: &str) -> Option<Event> {
    gateway.fetch_by_slug(slug).await.unwrap_or_else(|e| {
        error!(slug, error = %e, "Error fetching event by slug");
        None
    })
}

pub async fn team_members(gateway: &ContentGateway) -> Vec<TeamMember> {
    or_empty(
        "team members",
        gateway
            .fetch_collection(TEAM_ENDPOINT, &FetchOptions::per_page(LISTING_PAGE_SIZE))
            .await,
    )
}

pub async fn vacancies(gateway: &ContentGateway) -> Vec<Vacancy> {
    or_empty(
        "vacancies",
        gateway
            .fetch_collection(VACANCIES_ENDPOINT, &FetchOptions::per_page(LISTING_PAGE_SIZE))
            .await,
    )
}

pub async fn benefits(gateway: &ContentGateway) -> Vec<Benefit> {
    or_empty(
        "benefits",
        gateway
            .fetch_collection(BENEFITS_ENDPOINT, &FetchOptions::per_page(LISTING_PAGE_SIZE))
            .await,
    )
}

pub async fn interior_images(gateway: &ContentGateway, page_id: u64) -> InteriorGallery {
    match gateway.fetch_document(&page_endpoint(page_id)).await {
        Ok(document) => InteriorGallery::from_page(page_id, &document),
        Err(e) => {
            error!(page_id, error = %e, "Error fetching interior images");
            InteriorGallery::empty(page_id)
        }
    }
}

/// Products split into the three menu carousels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCarousels {
    pub special: Vec<Product>,
    pub dishes: Vec<Product>,
    pub drinks: Vec<Product>,
}

pub fn partition_by_type(products: Vec<Product>) -> ProductCarousels {
    let mut carousels = ProductCarousels::default();
    for product in products {
        match product.product_type {
            Some(ProductType::Special) => carousels.special.push(product),
            Some(ProductType::Dish) => carousels.dishes.push(product),
            Some(ProductType::Drink) => carousels.drinks.push(product),
            None => {}
        }
    }
    carousels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RetryPolicy;
    use crate::infra::scripted_http::{ScriptedHttp, ScriptedReply};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    const API: &str = "http://cms.test/wp-json/wp/v2";
    const ACF: &str = "http://cms.test/wp-json/acf/v3";

    fn gateway(http: Arc<ScriptedHttp>) -> ContentGateway {
        ContentGateway::new(
            http,
            API,
            ACF,
            RetryPolicy {
                max_attempts: 3,
                backoff_base: Duration::ZERO,
            },
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn outage_yields_empty_sections() {
        let http = Arc::new(ScriptedHttp::new());
        for path in [
            "/products?per_page=100&_embed=true",
            "/main_menu?per_page=100",
            "/game_menu?per_page=100",
            "/events_details?_embed=true",
            "/team_members?per_page=50",
            "/vacancies?per_page=50",
            "/benefits?per_page=50",
        ] {
            http.on(&format!("{}{}", API, path), ScriptedReply::transport("connection refused"));
        }
        http.on(&format!("{}/pages/53", ACF), ScriptedReply::json(500, json!({})));
        let gw = gateway(http.clone());

        assert!(products(&gw, None, Some(100)).await.is_empty());
        assert!(main_menu(&gw).await.is_empty());
        assert!(game_menu(&gw).await.is_empty());
        assert!(events(&gw).await.is_empty());
        assert!(event_by_slug(&gw, "autumn-tasting").await.is_none());
        assert!(team_members(&gw).await.is_empty());
        assert!(vacancies(&gw).await.is_empty());
        assert!(benefits(&gw).await.is_empty());
        assert!(interior_images(&gw, 53).await.is_empty());

        assert_eq!(http.count(&format!("{}/main_menu?per_page=100", API)), 3);
    }

    #[tokio::test]
    async fn filters_products_by_type() {
        let http = Arc::new(ScriptedHttp::new());
        http.on(
            &format!("{}/products?_embed=true", API),
            ScriptedReply::json(
                200,
                json!([
                    { "id": 1, "acf": { "product_type": "special" } },
                    { "id": 2, "acf": { "product_type": "drink" } },
                    { "id": 3, "acf": { "type": "special" } }
                ]),
            ),
        );
        let gw = gateway(http);

        let specials = products(&gw, Some(ProductType::Special), None).await;
        let ids: Vec<u64> = specials.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn loads_interior_gallery_from_acf_api() {
        let http = Arc::new(ScriptedHttp::new());
        http.on(
            &format!("{}/pages/53", ACF),
            ScriptedReply::json(200, json!({ "acf": { "center_image": "/img/hall.jpg" } })),
        );
        let gw = gateway(http);

        let gallery = interior_images(&gw, 53).await;
        assert_eq!(gallery.images.center, "/img/hall.jpg");
    }

    #[test]
    fn partitions_products_into_carousels() {
        let make = |id, t| Product {
            id,
            name: String::new(),
            image: String::new(),
            description: String::new(),
            price: String::new(),
            weight: String::new(),
            ingredients: String::new(),
            category: String::new(),
            product_type: t,
        };
        let carousels = partition_by_type(vec![
            make(1, Some(ProductType::Dish)),
            make(2, Some(ProductType::Drink)),
            make(3, None),
            make(4, Some(ProductType::Special)),
            make(5, Some(ProductType::Dish)),
        ]);
        assert_eq!(carousels.special.len(), 1);
        assert_eq!(carousels.dishes.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(carousels.drinks.len(), 1);
    }
}
