use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{NaiveDateTime, Timelike};

use crate::domain::NULL_VALUE;
use crate::record::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Sno,
    CustomerName,
    Age,
    Phone,
    Location,
    Date,
    Time,
}

pub const COLUMNS: [ColumnId; 7] = [
    ColumnId::Sno,
    ColumnId::CustomerName,
    ColumnId::Age,
    ColumnId::Phone,
    ColumnId::Location,
    ColumnId::Date,
    ColumnId::Time,
];

impl ColumnId {
    pub fn id(&self) -> &'static str {
        match self {
            ColumnId::Sno => "sno",
            ColumnId::CustomerName => "customer_name",
            ColumnId::Age => "age",
            ColumnId::Phone => "phone",
            ColumnId::Location => "location",
            ColumnId::Date => "date",
            ColumnId::Time => "time",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            ColumnId::Sno => "S.No.",
            ColumnId::CustomerName => "Customer Name",
            ColumnId::Age => "Age",
            ColumnId::Phone => "Phone",
            ColumnId::Location => "Location",
            ColumnId::Date => "Date",
            ColumnId::Time => "Time",
        }
    }

    /// Columns whose cells mark occurrences of the search text.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, ColumnId::CustomerName | ColumnId::Location)
    }

    /// Rendered cell text for `row`.
    pub fn render(&self, row: &Row) -> String {
        fn or_null<T: ToString>(value: Option<&T>) -> String {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| NULL_VALUE.to_string())
        }
        match self {
            ColumnId::Sno => row.sno.to_string(),
            ColumnId::CustomerName => or_null(row.customer_name.as_ref()),
            ColumnId::Age => or_null(row.age.as_ref()),
            ColumnId::Phone => or_null(row.phone.as_ref()),
            ColumnId::Location => or_null(row.location.as_ref()),
            ColumnId::Date => or_null(
                row.created_at
                    .map(|ts| ts.format("%Y-%m-%d").to_string())
                    .as_ref(),
            ),
            ColumnId::Time => or_null(
                row.created_at
                    .map(|ts| ts.format("%H:%M:%S").to_string())
                    .as_ref(),
            ),
        }
    }
}

/// Rendered values of one column, in data order.
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub max_width: usize,
    pub data: Vec<String>,
}

impl Column {
    pub fn load(id: ColumnId, rows: &[Row]) -> Self {
        let mut data = Vec::with_capacity(rows.len());
        let mut max_width = 0;
        for row in rows {
            let value = id.render(row).replace("\r\n", " ↵ ").replace('\n', " ↵ ");
            max_width = max_width.max(value.chars().count());
            data.push(value);
        }
        Column {
            id,
            name: id.header().to_string(),
            max_width,
            data,
        }
    }

    pub fn as_string(&self) -> String {
        format!(
            "\"{}\" ({}), width_max: {}, # rows {}",
            self.name,
            self.id.id(),
            self.max_width,
            self.data.len(),
        )
    }
}

pub type Comparator = fn(&Row, &Row) -> Ordering;

/// `hours * 100 + minutes`, seconds dropped.
pub fn sortable_time(ts: &NaiveDateTime) -> u32 {
    ts.hour() * 100 + ts.minute()
}

fn by_sno(a: &Row, b: &Row) -> Ordering {
    a.sno.cmp(&b.sno)
}

fn by_name(a: &Row, b: &Row) -> Ordering {
    a.customer_name.cmp(&b.customer_name)
}

fn by_age(a: &Row, b: &Row) -> Ordering {
    a.age.cmp(&b.age)
}

fn by_phone(a: &Row, b: &Row) -> Ordering {
    a.phone.cmp(&b.phone)
}

fn by_location(a: &Row, b: &Row) -> Ordering {
    a.location.cmp(&b.location)
}

// Full timestamp, so records of one day keep their time order
fn by_date(a: &Row, b: &Row) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

fn by_time(a: &Row, b: &Row) -> Ordering {
    let key = |r: &Row| r.created_at.as_ref().map(sortable_time);
    key(a).cmp(&key(b))
}

/// Ascending comparator for every column. `None` sorts first.
pub fn comparators() -> HashMap<ColumnId, Comparator> {
    HashMap::from([
        (ColumnId::Sno, by_sno as Comparator),
        (ColumnId::CustomerName, by_name as Comparator),
        (ColumnId::Age, by_age as Comparator),
        (ColumnId::Phone, by_phone as Comparator),
        (ColumnId::Location, by_location as Comparator),
        (ColumnId::Date, by_date as Comparator),
        (ColumnId::Time, by_time as Comparator),
    ])
}
