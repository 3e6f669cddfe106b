// Query description shared by every RemoteStore implementation
use std::fmt;

/// Columns to return, with embedded rows from referenced tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    columns: Vec<String>,
    embeds: Vec<Embed>,
}

/// A many-to-one join: `relation(columns)` resolved through `foreign_key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub relation: String,
    pub foreign_key: String,
    pub columns: Vec<String>,
}

impl Embed {
    pub fn new(relation: &str, foreign_key: &str, columns: &[&str]) -> Self {
        Self {
            relation: relation.to_string(),
            foreign_key: foreign_key.to_string(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::all()
    }
}

impl Select {
    /// `*`
    pub fn all() -> Self {
        Self {
            columns: Vec::new(),
            embeds: Vec::new(),
        }
    }

    pub fn columns(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            embeds: Vec::new(),
        }
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn is_all(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }
}

/// Renders the PostgREST `select` parameter, e.g. `*,patients(id,full_name)`
impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.clone()
        };
        for embed in &self.embeds {
            parts.push(format!("{}({})", embed.relation, embed.columns.join(",")));
        }
        write!(f, "{}", parts.join(","))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: Direction::Descending,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        write!(f, "{}.{}", self.column, direction)
    }
}

/// Equality filter; values are compared in their text form like PostgREST does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

/// Filters, ordering and projection for one table operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub select: Select,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    /// Exactly one row is expected back
    pub single: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, select: Select) -> Self {
        self.select = select;
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn order_by(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.order.extend(orders);
        self
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Query-string parameters in PostgREST syntax
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.to_string())];

        for filter in &self.filters {
            params.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        params
    }

    /// Filters only, for mutations that must not carry a `select`
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
            .collect()
    }
}
