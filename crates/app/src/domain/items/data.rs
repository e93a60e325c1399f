//! Items Data

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{
    items::records::{ItemStatus, ItemUuid},
    validation::ValidationErrors,
};

pub const TITLE_MAX_CHARS: usize = 64;
pub const DESCRIPTION_MAX_CHARS: usize = 1024;
pub const IMAGE_URL_MAX_CHARS: usize = 256;
pub const PRICE_MAX_DIGITS: u32 = 6;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// New Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub uuid: ItemUuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl NewItem {
    /// Check field limits, collecting every failure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_text(&mut errors, "title", &self.title, TITLE_MAX_CHARS);
        check_text(&mut errors, "description", &self.description, DESCRIPTION_MAX_CHARS);
        check_price(&mut errors, self.price);

        if let Some(url) = &self.image_url {
            check_image_url(&mut errors, url);
        }

        errors.into_result()
    }
}

/// Item Update Data
///
/// `None` leaves a field untouched. `image_url: Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<Option<String>>,
    pub status: Option<ItemStatus>,
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(title) = &self.title {
            check_text(&mut errors, "title", title, TITLE_MAX_CHARS);
        }

        if let Some(description) = &self.description {
            check_text(&mut errors, "description", description, DESCRIPTION_MAX_CHARS);
        }

        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }

        if let Some(Some(url)) = &self.image_url {
            check_image_url(&mut errors, url);
        }

        errors.into_result()
    }
}

/// Catalog sort order, parsed from `title`, `-title`, `price` or `-price`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemOrdering {
    #[default]
    Newest,
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
}

impl ItemOrdering {
    pub(crate) const fn order_by_sql(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC, uuid DESC",
            Self::TitleAsc => "title ASC, uuid ASC",
            Self::TitleDesc => "title DESC, uuid DESC",
            Self::PriceAsc => "price ASC, uuid ASC",
            Self::PriceDesc => "price DESC, uuid DESC",
        }
    }
}

impl FromStr for ItemOrdering {
    type Err = ValidationErrors;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "title" => Ok(Self::TitleAsc),
            "-title" => Ok(Self::TitleDesc),
            "price" => Ok(Self::PriceAsc),
            "-price" => Ok(Self::PriceDesc),
            _ => Err(ValidationErrors::single(
                "ordering",
                "Ordering must be one of: title, -title, price, -price",
            )),
        }
    }
}

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Clamp user input into a usable window.
    #[must_use]
    pub fn new(number: Option<u32>, size: Option<u32>) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.size)
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.size)
    }

    #[must_use]
    pub fn num_pages(self, count: u64) -> u64 {
        count.div_ceil(u64::from(self.size)).max(1)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Catalog listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsQuery {
    pub status: Option<ItemStatus>,
    pub search: Option<String>,
    pub ordering: ItemOrdering,
    pub page: Page,
}

fn check_text(errors: &mut ValidationErrors, field: &str, value: &str, max_chars: usize) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    } else if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_chars} characters."),
        );
    }
}

fn check_price(errors: &mut ValidationErrors, price: Decimal) {
    let normalized = price.normalize();
    let max_whole = Decimal::from(10_u64.pow(PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES));

    if normalized.is_sign_negative() && !normalized.is_zero() {
        errors.add("price", "Ensure this value is greater than or equal to 0.");
    } else if normalized.scale() > PRICE_DECIMAL_PLACES {
        errors.add(
            "price",
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        );
    } else if normalized >= max_whole {
        errors.add(
            "price",
            format!("Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total."),
        );
    }
}

fn check_image_url(errors: &mut ValidationErrors, url: &str) {
    if url.chars().count() > IMAGE_URL_MAX_CHARS {
        errors.add(
            "image_url",
            format!("Ensure this field has no more than {IMAGE_URL_MAX_CHARS} characters."),
        );
        return;
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    let valid = rest.is_some_and(|rest| {
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        !host.is_empty() && !host.contains(char::is_whitespace)
    });

    if !valid {
        errors.add("image_url", "Enter a valid URL.");
    }
}
