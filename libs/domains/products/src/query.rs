//! Translation of list query-string parameters into a product query.

use utoipa::IntoParams;

use crate::models::Product;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw query-string parameters of the list endpoint.
///
/// Everything is accepted as text; [`ProductQuery::from`] applies the
/// defaults and drops values that do not parse.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
    /// Field to sort by; no sort when absent or empty
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_order: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub colour: Option<String>,
    pub dimensions: Option<String>,
    pub currency_unit: Option<String>,
    /// Exact price; ignored when not a number
    pub price: Option<String>,
}

impl ListParams {
    /// Collect parameters from decoded query pairs.
    ///
    /// The first value of a repeated key wins and unknown keys are ignored,
    /// so no query string is ever rejected.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                "name" => &mut params.name,
                "description" => &mut params.description,
                "colour" => &mut params.colour,
                "dimensions" => &mut params.dimensions,
                "currencyUnit" => &mut params.currency_unit,
                "price" => &mut params.price,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Exact-match, case-sensitive equality filter. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub colour: Option<String>,
    pub dimensions: Option<String>,
    pub currency_unit: Option<String>,
    pub price: Option<f64>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `product` satisfies every present criterion.
    pub fn matches(&self, product: &Product) -> bool {
        fn eq(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().map_or(true, |e| e == actual)
        }

        eq(&self.name, &product.name)
            && eq(&self.description, &product.description)
            && eq(&self.colour, &product.colour)
            && eq(&self.dimensions, &product.dimensions)
            && eq(&self.currency_unit, &product.currency_unit)
            && self.price.map_or(true, |p| p == product.price)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` selects descending order; anything else is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// MongoDB sort direction.
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Single-field sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// A fully resolved list query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: Option<SortSpec>,
    /// Always >= 1
    pub page: u64,
    /// Always >= 1
    pub limit: u64,
}

impl ProductQuery {
    /// Number of documents to skip: `(page - 1) * limit`, capped at
    /// `i64::MAX` since the server takes a signed 64-bit skip.
    pub fn skip(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            filter: ProductFilter::default(),
            sort: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .map_or(default, |n| n as u64)
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        let page = positive_or(params.page.as_deref(), DEFAULT_PAGE);
        let limit = positive_or(params.limit.as_deref(), DEFAULT_LIMIT);

        let sort = non_empty(params.sort_by).map(|field| SortSpec {
            field,
            order: SortOrder::parse(params.sort_order.as_deref()),
        });

        let filter = ProductFilter {
            name: non_empty(params.name),
            description: non_empty(params.description),
            colour: non_empty(params.colour),
            dimensions: non_empty(params.dimensions),
            currency_unit: non_empty(params.currency_unit),
            price: params
                .price
                .as_deref()
                .filter(|s| !s.is_empty())
                .and_then(|s| s.parse::<f64>().ok()),
        };

        Self {
            filter,
            sort,
            page,
            limit,
        }
    }
}
