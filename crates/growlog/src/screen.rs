//! Screen controller for the growth-record view.
//!
//! The interactive front-end (the CLI here) does not talk to the store
//! directly. It raises events on a [`Screen`]: focus and blur on form
//! fields, masked text input, child-picker interaction, submit and
//! delete. The screen owns the [`ScreenState`] those events mutate and
//! derives the display views (record cards, chart series) from the
//! record list.
//!
//! Storage failures never escape this layer. Load and save errors are
//! logged and folded into a non-blocking notice the front-end may show,
//! and the session continues with whatever state is still valid.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::metrics::{self, Category, ChartPoint, Severity};
use crate::record::{ChildReference, NutritionRecord};
use crate::store::{self, KvStore, RecordStore, StoreStats};

/// Input mask for the weight field: two digits, a dot, two digits.
const WEIGHT_MASK: &str = "99.99";

/// Input mask for the height field: one digit, a dot, two digits.
const HEIGHT_MASK: &str = "9.99";

/// A form field on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The child's name.
    Name,
    /// Weight in kilograms.
    Weight,
    /// Height in meters.
    Height,
}

impl Field {
    /// Lowercase field name for messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Weight => "weight",
            Self::Height => "height",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the next submit will do with the form contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    /// Append a new record.
    #[default]
    New,
    /// Replace the record at this index.
    At(usize),
}

impl EditTarget {
    /// The target index, or `None` when appending.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::New => None,
            Self::At(index) => Some(index),
        }
    }
}

/// Mutable state of the screen: form fields, validation flags, and the
/// current notice.
///
/// Only the [`Screen`] mutates this; the front-end reads it through the
/// accessors.
#[derive(Debug, Default)]
pub struct ScreenState {
    name: String,
    weight: String,
    height: String,
    touched: HashSet<Field>,
    target: EditTarget,
    picker_open: bool,
    notice: Option<String>,
}

impl ScreenState {
    /// Current contents of the name field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current contents of the weight field.
    #[must_use]
    pub fn weight(&self) -> &str {
        &self.weight
    }

    /// Current contents of the height field.
    #[must_use]
    pub fn height(&self) -> &str {
        &self.height
    }

    /// Whether the field has been blurred since it was last focused.
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// What the next submit will do.
    #[must_use]
    pub fn target(&self) -> EditTarget {
        self.target
    }

    /// Whether the child picker is showing.
    #[must_use]
    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    /// The current notice, if one is pending.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// Result of a submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was persisted; it now lives at this index.
    Saved {
        /// Index the record occupies in the list.
        index: usize,
    },
    /// Required fields are empty; nothing was persisted.
    Invalid(Vec<Field>),
    /// The write failed; the form is left as it was and a notice is set.
    Failed,
}

/// One record prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordCard {
    /// The child's name.
    pub name: String,
    /// Weight text as stored.
    pub weight_kg: String,
    /// Height text as stored.
    pub height_m: String,
    /// Body-mass index rounded to two decimals.
    pub index: f64,
    /// Weight category, classified from the unrounded index.
    pub category: Category,
    /// Severity channel for the category.
    pub severity: Severity,
    /// Display color name for the severity.
    pub color: &'static str,
}

impl From<&NutritionRecord> for RecordCard {
    fn from(record: &NutritionRecord) -> Self {
        let category = record.category();
        let severity = category.severity();
        Self {
            name: record.name.clone(),
            weight_kg: record.weight_kg.clone(),
            height_m: record.height_m.clone(),
            index: metrics::round2(record.index()),
            category,
            severity,
            color: severity.color(),
        }
    }
}

/// The growth-record screen: record store, child roster, and form state.
#[derive(Debug)]
pub struct Screen {
    store: RecordStore,
    children: Vec<ChildReference>,
    state: ScreenState,
}

impl Screen {
    /// Open the screen over the given key-value store.
    ///
    /// Loads the child roster and the saved record list. A load failure
    /// does not abort the session: the list stays empty, the failure is
    /// logged, and a notice is set for the front-end to show.
    #[must_use]
    pub fn open(kv: KvStore) -> Self {
        let children = store::load_children(&kv);
        let mut store = RecordStore::new(kv);
        let mut state = ScreenState::default();

        if let Err(err) = store.load() {
            warn!("Loading saved records failed: {}", err);
            state.notice = Some(format!("could not load saved records: {err}"));
        }

        Self {
            store,
            children,
            state,
        }
    }

    // === Form events ===

    /// The user focused a field.
    pub fn focus(&mut self, field: Field) {
        self.state.touched.remove(&field);
    }

    /// The user left a field.
    pub fn blur(&mut self, field: Field) {
        self.state.touched.insert(field);
    }

    /// The user typed into a field.
    ///
    /// Weight and height input is shaped by the `99.99` / `9.99` masks:
    /// non-digits are dropped and the dot is inserted at its fixed
    /// position, so partial fills like `12.5` stay legal.
    pub fn input(&mut self, field: Field, text: &str) {
        match field {
            Field::Name => self.state.name = text.to_string(),
            Field::Weight => self.state.weight = apply_mask(WEIGHT_MASK, text),
            Field::Height => self.state.height = apply_mask(HEIGHT_MASK, text),
        }
    }

    /// Show the child picker.
    pub fn open_picker(&mut self) {
        self.state.picker_open = true;
    }

    /// Hide the child picker.
    pub fn close_picker(&mut self) {
        self.state.picker_open = false;
    }

    /// The user picked a child from the roster.
    ///
    /// Copies the child's name into the name field and closes the
    /// picker. Returns `false` (with no state change) if the index does
    /// not name a roster entry.
    pub fn select_child(&mut self, index: usize) -> bool {
        match self.children.get(index) {
            Some(child) => {
                self.state.name = child.responsible_name.clone();
                self.state.picker_open = false;
                true
            }
            None => false,
        }
    }

    /// Begin editing the record at `index`.
    ///
    /// Loads the record's fields into the form and aims the next submit
    /// at that index. Validation state resets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if there is no record at `index`.
    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        let record = self
            .store
            .records()
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.store.records().len()))?;

        self.state.name = record.name.clone();
        self.state.weight = record.weight_kg.clone();
        self.state.height = record.height_m.clone();
        self.state.touched.clear();
        self.state.target = EditTarget::At(index);
        Ok(())
    }

    /// Submit the form.
    ///
    /// All three fields are required. On success the record is persisted
    /// at the edit target (append for [`EditTarget::New`]) and the form
    /// resets. On a write failure the form keeps its contents so the
    /// user can retry, and a notice is set.
    pub fn submit(&mut self) -> SubmitOutcome {
        for field in [Field::Name, Field::Weight, Field::Height] {
            self.state.touched.insert(field);
        }

        let missing: Vec<Field> = [Field::Name, Field::Weight, Field::Height]
            .into_iter()
            .filter(|field| self.field_value(*field).is_empty())
            .collect();
        if !missing.is_empty() {
            return SubmitOutcome::Invalid(missing);
        }

        let record = NutritionRecord::new(
            self.state.name.clone(),
            self.state.weight.clone(),
            self.state.height.clone(),
        );

        match self.store.upsert(record, self.state.target.index()) {
            Ok(index) => {
                self.reset_form();
                SubmitOutcome::Saved { index }
            }
            Err(err) => {
                error!("Saving record failed: {}", err);
                self.state.notice = Some(format!("could not save record: {err}"));
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete the record at `index`.
    ///
    /// Returns `true` if the record was removed. Failures (out-of-range
    /// index, write error) are logged, set a notice, and return `false`.
    pub fn delete(&mut self, index: usize) -> bool {
        match self.store.delete(index) {
            Ok(_) => true,
            Err(err) => {
                warn!("Deleting record failed: {}", err);
                self.state.notice = Some(format!("could not delete record: {err}"));
                false
            }
        }
    }

    /// Take the pending notice, clearing it.
    pub fn dismiss_notice(&mut self) -> Option<String> {
        self.state.notice.take()
    }

    // === Views ===

    /// The current record list, in storage order.
    #[must_use]
    pub fn records(&self) -> &[NutritionRecord] {
        self.store.records()
    }

    /// The child roster.
    #[must_use]
    pub fn children(&self) -> &[ChildReference] {
        &self.children
    }

    /// The current screen state.
    #[must_use]
    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Validation message for a field, if it should show one.
    ///
    /// A field shows `required` once it has been touched and is empty.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        if self.state.is_touched(field) && self.field_value(field).is_empty() {
            Some("required")
        } else {
            None
        }
    }

    /// Record cards for display, one per record in list order.
    #[must_use]
    pub fn cards(&self) -> Vec<RecordCard> {
        self.store.records().iter().map(RecordCard::from).collect()
    }

    /// The chart series for the current list.
    #[must_use]
    pub fn chart(&self) -> Vec<ChartPoint> {
        metrics::chart_series(self.store.records())
    }

    /// Statistics about the backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        self.store.stats()
    }

    fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.state.name,
            Field::Weight => &self.state.weight,
            Field::Height => &self.state.height,
        }
    }

    fn reset_form(&mut self) {
        self.state.name.clear();
        self.state.weight.clear();
        self.state.height.clear();
        self.state.touched.clear();
        self.state.target = EditTarget::New;
    }
}

/// Shape raw input to a numeric mask.
///
/// Non-digit input characters are dropped. Mask positions marked `9`
/// consume one digit each; literal mask characters (the dot) are emitted
/// only when another digit follows, so partially filled values never end
/// in a dangling separator. Digits beyond the mask are dropped.
fn apply_mask(mask: &str, input: &str) -> String {
    let mut digits = input.chars().filter(char::is_ascii_digit);
    let mut out = String::new();
    let mut pending = String::new();

    for slot in mask.chars() {
        if slot == '9' {
            match digits.next() {
                Some(digit) => {
                    out.push_str(&pending);
                    pending.clear();
                    out.push(digit);
                }
                None => break,
            }
        } else {
            pending.push(slot);
        }
    }

    out
}
