use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::constants::PLAN_DAYS;

use super::Axis;

/// A single course offering: title, link and the task template copied into a
/// block when its day is loaded.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub tasks: &'a [&'a str],
}

#[derive(Clone, Copy, Debug)]
pub struct PlanCatalogs<'a> {
    pub ai: &'a [CatalogEntry<'a>],
    pub brand: &'a [CatalogEntry<'a>],
    pub law: &'a [CatalogEntry<'a>],
}

impl<'a> PlanCatalogs<'a> {
    pub fn for_axis(&self, axis: Axis) -> &'a [CatalogEntry<'a>] {
        match axis {
            Axis::Ai => self.ai,
            Axis::Brand => self.brand,
            Axis::Law => self.law,
        }
    }
}

/// One day of the plan. Columns A/B/C carry the AI, Brand and Law lanes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PlanEntry {
    pub day: u32,
    #[serde(rename = "A", default)]
    pub ai_title: String,
    #[serde(rename = "Alink", default)]
    pub ai_link: String,
    #[serde(rename = "Atasks", default)]
    pub ai_tasks: Vec<String>,
    #[serde(rename = "B", default)]
    pub brand_title: String,
    #[serde(rename = "Blink", default)]
    pub brand_link: String,
    #[serde(rename = "Btasks", default)]
    pub brand_tasks: Vec<String>,
    #[serde(rename = "C", default)]
    pub law_title: String,
    #[serde(rename = "Clink", default)]
    pub law_link: String,
    #[serde(rename = "Ctasks", default)]
    pub law_tasks: Vec<String>,
}

impl PlanEntry {
    pub fn blank(day: u32) -> Self {
        Self {
            day,
            ..Self::default()
        }
    }

    pub fn title(&self, axis: Axis) -> &str {
        match axis {
            Axis::Ai => &self.ai_title,
            Axis::Brand => &self.brand_title,
            Axis::Law => &self.law_title,
        }
    }

    pub fn link(&self, axis: Axis) -> &str {
        match axis {
            Axis::Ai => &self.ai_link,
            Axis::Brand => &self.brand_link,
            Axis::Law => &self.law_link,
        }
    }

    pub fn tasks(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Ai => &self.ai_tasks,
            Axis::Brand => &self.brand_tasks,
            Axis::Law => &self.law_tasks,
        }
    }

    pub fn field_mut(&mut self, field: PlanField) -> &mut String {
        match (field.axis, field.kind) {
            (Axis::Ai, PlanFieldKind::Title) => &mut self.ai_title,
            (Axis::Ai, PlanFieldKind::Link) => &mut self.ai_link,
            (Axis::Brand, PlanFieldKind::Title) => &mut self.brand_title,
            (Axis::Brand, PlanFieldKind::Link) => &mut self.brand_link,
            (Axis::Law, PlanFieldKind::Title) => &mut self.law_title,
            (Axis::Law, PlanFieldKind::Link) => &mut self.law_link,
        }
    }

    fn fill_lane(&mut self, axis: Axis, entry: &CatalogEntry<'_>) {
        let tasks: Vec<String> = entry.tasks.iter().map(|t| t.to_string()).collect();
        let (title, link, lane_tasks) = match axis {
            Axis::Ai => (&mut self.ai_title, &mut self.ai_link, &mut self.ai_tasks),
            Axis::Brand => (
                &mut self.brand_title,
                &mut self.brand_link,
                &mut self.brand_tasks,
            ),
            Axis::Law => (&mut self.law_title, &mut self.law_link, &mut self.law_tasks),
        };
        *title = entry.title.to_string();
        *link = entry.link.to_string();
        *lane_tasks = tasks;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlanFieldKind {
    Title,
    Link,
}

/// The closed set of plan fields a user may edit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlanField {
    pub axis: Axis,
    pub kind: PlanFieldKind,
}

impl PlanField {
    pub fn new(axis: Axis, kind: PlanFieldKind) -> Self {
        Self { axis, kind }
    }

    fn column(self) -> &'static str {
        match self.axis {
            Axis::Ai => "A",
            Axis::Brand => "B",
            Axis::Law => "C",
        }
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PlanFieldKind::Title => write!(f, "{}", self.column()),
            PlanFieldKind::Link => write!(f, "{}link", self.column()),
        }
    }
}

impl FromStr for PlanField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let (column, kind) = match normalized.strip_suffix("link") {
            Some(column) => (column, PlanFieldKind::Link),
            None => (normalized.as_str(), PlanFieldKind::Title),
        };
        let axis = match column {
            "a" => Axis::Ai,
            "b" => Axis::Brand,
            "c" => Axis::Law,
            _ => {
                return Err(format!(
                    "unknown plan field '{}', expected one of A, Alink, B, Blink, C, Clink",
                    s
                ));
            }
        };
        Ok(PlanField::new(axis, kind))
    }
}

fn pick<'a>(catalog: &'a [CatalogEntry<'a>], day: u32) -> Option<&'a CatalogEntry<'a>> {
    if catalog.is_empty() {
        return None;
    }
    catalog.get((day as usize - 1) % catalog.len())
}

/// Builds the full day-indexed plan. Each axis cycles through its own catalog
/// independently, so catalogs of different lengths drift against each other.
pub fn generate_full_plan(catalogs: &PlanCatalogs<'_>) -> Vec<PlanEntry> {
    (1..=PLAN_DAYS)
        .map(|day| {
            let mut entry = PlanEntry::blank(day);
            for axis in Axis::ALL {
                if let Some(item) = pick(catalogs.for_axis(axis), day) {
                    entry.fill_lane(axis, item);
                }
            }
            entry
        })
        .collect()
}

/// Overwrites one field of an existing day. Unknown days are ignored and no
/// entry is ever created.
pub fn edit_plan_field(plan: &mut [PlanEntry], day: u32, field: PlanField, value: String) -> bool {
    match plan.iter_mut().find(|entry| entry.day == day) {
        Some(entry) => {
            *entry.field_mut(field) = value;
            true
        }
        None => false,
    }
}

pub fn find_day(plan: &[PlanEntry], day: u32) -> Option<&PlanEntry> {
    plan.iter().find(|entry| entry.day == day)
}

/// A plan is either empty or exactly the days 1..=PLAN_DAYS in order.
pub fn is_well_formed(plan: &[PlanEntry]) -> bool {
    plan.is_empty()
        || (plan.len() == PLAN_DAYS as usize
            && plan
                .iter()
                .enumerate()
                .all(|(i, entry)| entry.day as usize == i + 1))
}
