//! # Option Dimensions
//!
//! An option dimension is a named axis of customization (size, frame color,
//! thickness). Each dimension carries an ordered list of choices with signed
//! price deltas, and exactly one choice is selected at all times — a default
//! is pre-selected at construction and selection can only move between
//! existing choices, never become empty.

use serde::{Deserialize, Serialize};

use crate::error::LienzoError;

/// One selectable value within a dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChoice {
    pub id: String,
    pub label: String,
    /// Signed price delta in cents, added to the base price when selected.
    #[serde(default)]
    pub price_delta: i64,
    /// Highlighted as the popular pick in the option list.
    #[serde(default)]
    pub is_popular: bool,
    /// Represents the "none" option (e.g. "No Frame").
    #[serde(default)]
    pub is_none: bool,
}

impl OptionChoice {
    pub fn new(id: &str, label: &str, price_delta: i64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            price_delta,
            is_popular: false,
            is_none: false,
        }
    }

    pub fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    pub fn none_option(mut self) -> Self {
        self.is_none = true;
        self
    }
}

/// A named axis of customization with its choices and current selection.
///
/// Immutable after construction apart from the selected index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDimension {
    pub id: String,
    pub label: String,
    choices: Vec<OptionChoice>,
    /// Index into `choices`; always valid.
    selected: usize,
}

impl OptionDimension {
    /// Build a dimension with the first choice pre-selected.
    ///
    /// Returns a validation error for an empty choice list — a dimension
    /// without choices cannot satisfy the always-selected invariant.
    pub fn new(id: &str, label: &str, choices: Vec<OptionChoice>) -> Result<Self, LienzoError> {
        if choices.is_empty() {
            return Err(LienzoError::Validation(format!(
                "Option dimension '{}' has no choices",
                label
            )));
        }
        Ok(Self {
            id: id.to_string(),
            label: label.to_string(),
            choices,
            selected: 0,
        })
    }

    pub fn choices(&self) -> &[OptionChoice] {
        &self.choices
    }

    /// The currently selected choice. Always present.
    pub fn selected_choice(&self) -> &OptionChoice {
        &self.choices[self.selected]
    }

    /// Select a choice by id.
    pub fn select(&mut self, choice_id: &str) -> Result<(), LienzoError> {
        match self.choices.iter().position(|c| c.id == choice_id) {
            Some(index) => {
                self.selected = index;
                Ok(())
            }
            None => Err(LienzoError::Validation(format!(
                "Unknown choice '{}' for {}",
                choice_id, self.label
            ))),
        }
    }
}

/// All dimensions of a product, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    dimensions: Vec<OptionDimension>,
}

impl SelectionSet {
    pub fn new(dimensions: Vec<OptionDimension>) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> &[OptionDimension] {
        &self.dimensions
    }

    pub fn get(&self, dimension_id: &str) -> Option<&OptionDimension> {
        self.dimensions.iter().find(|d| d.id == dimension_id)
    }

    /// Select a choice within a dimension.
    pub fn select(&mut self, dimension_id: &str, choice_id: &str) -> Result<(), LienzoError> {
        let dimension = self
            .dimensions
            .iter_mut()
            .find(|d| d.id == dimension_id)
            .ok_or_else(|| {
                LienzoError::Validation(format!("Unknown option dimension '{}'", dimension_id))
            })?;
        dimension.select(choice_id)
    }

    /// Sum of selected price deltas across all dimensions.
    ///
    /// A dimension that is not present contributes nothing — there is no
    /// selection to add, so its delta is simply never summed.
    pub fn delta_sum(&self) -> i64 {
        self.dimensions
            .iter()
            .map(|d| d.selected_choice().price_delta)
            .sum()
    }

    /// Selected labels per dimension, for display and order payloads.
    pub fn selected_labels(&self) -> Vec<(String, String)> {
        self.dimensions
            .iter()
            .map(|d| (d.label.clone(), d.selected_choice().label.clone()))
            .collect()
    }
}
