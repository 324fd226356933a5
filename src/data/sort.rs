use std::cmp::Ordering;

use crate::data::record::StudentRecord;

/// Columns the table can be reordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Age,
    Course,
    Email,
    Phone,
    Status,
}

impl SortColumn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            "course" => Some(Self::Course),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Age => "age",
            Self::Course => "course",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Status => "status",
        }
    }
}

/// Latest sort column plus direction. The direction deliberately flips on
/// every `sort_records` call, including the first touch of a newly selected
/// column; it carries over from whatever column was sorted before. This
/// matches the long-observed header-click behavior.
#[derive(Debug, Clone, Copy)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

/// Reorder `records` in place by `column`, flipping the direction in
/// `state` first. Ties between equal keys may land in either order.
pub fn sort_records(records: &mut [StudentRecord], state: &mut SortState, column: SortColumn) {
    state.column = Some(column);
    state.ascending = !state.ascending;

    let ascending = state.ascending;
    records.sort_by(|a, b| {
        let ord = compare(a, b, column);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

fn compare(a: &StudentRecord, b: &StudentRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Age => a.age.cmp(&b.age),
        SortColumn::Name => text_cmp(&a.name, &b.name),
        SortColumn::Course => text_cmp(&a.course, &b.course),
        SortColumn::Email => text_cmp(&a.email, &b.email),
        SortColumn::Phone => text_cmp(&a.phone, &b.phone),
        SortColumn::Status => text_cmp(&a.status, &b.status),
    }
}

// Case-insensitive stand-in for locale-aware collation; the stack carries
// no ICU tables and the record text is plain ASCII in practice.
fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
