//! Row clustering.
//!
//! A single pass over components sorted top to bottom. The open row keeps
//! the mean centre line and mean height of its members; a component joins
//! it when its centre lies within `tolerance * mean height` of that line.
//! A component whose top edge equals the previous member's top edge always
//! joins, so components drawn at the same y stay on one row whatever their
//! heights.

use crate::ir::Component;

/// A row under construction.
#[derive(Clone, Debug)]
pub struct RowCluster {
    members: Vec<Component>,
    center_sum: f64,
    height_sum: f64,
}

impl RowCluster {
    fn start(component: Component) -> Self {
        let mut row = Self {
            members: Vec::new(),
            center_sum: 0.0,
            height_sum: 0.0,
        };
        row.push(component);
        row
    }

    fn push(&mut self, component: Component) {
        self.center_sum += component.bbox.center_y();
        self.height_sum += component.bbox.height as f64;
        self.members.push(component);
    }

    /// Mean centre line of the members.
    pub fn reference_center(&self) -> f64 {
        self.center_sum / self.members.len() as f64
    }

    /// Mean member height.
    pub fn average_height(&self) -> f64 {
        self.height_sum / self.members.len() as f64
    }

    fn accepts(&self, component: &Component, tolerance: f64) -> bool {
        let same_top = self
            .members
            .last()
            .is_some_and(|last| last.bbox.y == component.bbox.y);
        let distance = (component.bbox.center_y() - self.reference_center()).abs();
        same_top || distance < tolerance * self.average_height()
    }

    pub fn members(&self) -> &[Component] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Component> {
        self.members
    }
}

/// Fold state: closed rows plus the open one.
#[derive(Clone, Debug)]
pub struct RowAccumulator {
    tolerance: f64,
    closed: Vec<RowCluster>,
    open: Option<RowCluster>,
}

impl RowAccumulator {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            closed: Vec::new(),
            open: None,
        }
    }

    /// Feeds the next component in top-to-bottom order.
    pub fn push(mut self, component: Component) -> Self {
        match self.open.take() {
            Some(mut row) if row.accepts(&component, self.tolerance) => {
                row.push(component);
                self.open = Some(row);
            }
            Some(row) => {
                self.closed.push(row);
                self.open = Some(RowCluster::start(component));
            }
            None => self.open = Some(RowCluster::start(component)),
        }
        self
    }

    /// Closes the open row and returns all rows in detection order.
    pub fn finish(mut self) -> Vec<RowCluster> {
        if let Some(row) = self.open.take() {
            self.closed.push(row);
        }
        self.closed
    }
}

/// Groups components, already sorted by `(y, x)`, into rows.
pub fn cluster_rows(sorted: Vec<Component>, tolerance: f64) -> Vec<RowCluster> {
    sorted
        .into_iter()
        .fold(RowAccumulator::new(tolerance), RowAccumulator::push)
        .finish()
}
