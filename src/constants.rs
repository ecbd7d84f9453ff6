/// CMS collection endpoints, relative to the REST base URL
pub const PRODUCTS_ENDPOINT: &str = "/products";
pub const MAIN_MENU_ENDPOINT: &str = "/main_menu";
pub const GAME_MENU_ENDPOINT: &str = "/game_menu";
pub const EVENTS_ENDPOINT: &str = "/events_details";
pub const TEAM_ENDPOINT: &str = "/team_members";
pub const VACANCIES_ENDPOINT: &str = "/vacancies";
pub const BENEFITS_ENDPOINT: &str = "/benefits";

/// Endpoints with this prefix are served by the custom-fields (ACF) API
pub const PAGES_PREFIX: &str = "/pages";

/// Page whose custom fields hold the interior gallery
pub const INTERIOR_PAGE_ID: u64 = 53;

pub fn page_endpoint(page_id: u64) -> String {
    format!("{}/{}", PAGES_PREFIX, page_id)
}

pub const DEFAULT_WORDPRESS_API_URL: &str = "http://my-restuaran.local/wp-json/wp/v2";
pub const DEFAULT_WORDPRESS_ACF_URL: &str = "http://my-restuaran.local/wp-json/acf/v3";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1000;
/// One hour, matching the page revalidation interval
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;
pub const DEFAULT_PORT: u16 = 3000;

// Display fallbacks for fields the CMS leaves empty
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";
pub const UNTITLED_PRODUCT: &str = "Без названия";
pub const UNNAMED_TEAM_MEMBER: &str = "Сотрудник";
pub const UNCATEGORIZED: &str = "Прочее";

/// Static restaurant details shown on the home, contacts and booking pages
pub mod restaurant {
    pub const NAME: &str = "Meatra";
    pub const TAGLINE: &str = "Ресторан для настоящих ценителей мяса в самом сердце Бреста";
    pub const ADDRESS: &str = "ул. Куйбышева 33, Брест";
    pub const PHONE: &str = "+375 (29) 325-15-15";
    pub const EMAIL: &str = "info@meatra.by";
    pub const LATITUDE: f64 = 52.093882;
    pub const LONGITUDE: f64 = 23.693894;
    pub const HOURS_WEEKDAYS: &str = "Пн–Чт: 11:00 – 23:00";
    pub const HOURS_WEEKEND: &str = "Пт–Сб: 11:00 – 01:00";
    pub const HOURS_SUNDAY: &str = "Вс: 11:00 – 23:00";
    pub const INSTAGRAM: &str = "@meatra_brest";
    pub const YANDEX_EDA: &str = "https://eda.yandex.ru";
}

/// Benefits shown on the career page when the CMS has none published
pub const STATIC_BENEFITS: [(u64, &str, &str); 4] = [
    (
        1,
        "ГИБКИЙ ГРАФИК",
        "Сменный график работы позволяет легко совмещать работу в ресторане с учебой или другими занятиями.",
    ),
    (
        2,
        "РАЗВИТИЕ КОММУНИКАТИВНЫХ НАВЫКОВ",
        "Работа в ресторанной сфере – это отличная возможность прокачать навыки общения.",
    ),
    (
        3,
        "КАРЬЕРНЫЙ РОСТ",
        "Широкие возможности для профессионального роста от базовой позиции до управляющего.",
    ),
    (
        4,
        "БОНУСЫ",
        "Социальный пакет, питание и другие льготы для сотрудников.",
    ),
];
