use std::io::{BufRead, Error as IoError};

use displaydoc::Display;
use log::debug;
use thiserror::Error;

/// The ordered labels of the classifier.
///
/// The position of a label is the class index predicted by the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels(Vec<String>);

/// The potential errors of the labels.
#[derive(Debug, Display, Error)]
pub enum LabelsError {
    /// Failed to read the labels: {0}
    Read(#[from] IoError),
    /// The labels must not be empty
    Empty,
}

impl Labels {
    /// Creates the labels from their ordered names.
    pub fn new<I, S>(labels: I) -> Result<Self, LabelsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        if labels.is_empty() {
            Err(LabelsError::Empty)
        } else {
            Ok(Self(labels))
        }
    }

    /// Parses the labels with one label per line.
    pub fn parse(labels: impl BufRead) -> Result<Self, LabelsError> {
        let mut labels = labels
            .lines()
            .map(|line| line.map(|line| line.trim().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        while labels.last().map_or(false, String::is_empty) {
            labels.pop();
        }
        debug!("Parsed {} labels.", labels.len());

        Self::new(labels)
    }

    /// Gets the number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether there are no labels, which never holds for valid labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the label of the class index.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    /// Gets the labels in class index order.
    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }
}
