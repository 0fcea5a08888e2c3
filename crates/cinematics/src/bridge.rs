use foundation::geo::LngLat;

/// One picked entity from the data layer: a coordinate plus whatever
/// semantic payload the feed attached (passed through untouched for UI
/// display). Consumed once per selection event.
///
/// Coordinates are not validated here; feeding NaN/∞ into the camera
/// surface is undefined behavior by contract, so the data layer sanitizes
/// before posting.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTarget {
    pub coordinate: LngLat,
    pub properties: serde_json::Value,
}

impl SelectionTarget {
    pub fn new(coordinate: LngLat, properties: serde_json::Value) -> Self {
        Self {
            coordinate,
            properties,
        }
    }
}

/// Capacity-one, latest-wins channel from the data layer to the director.
///
/// Fire-and-forget with at most one active consumer: posting while a
/// selection is still pending replaces it. Only the newest pick matters by
/// the time the next frame drains the mailbox.
#[derive(Debug, Default)]
pub struct SelectionMailbox {
    pending: Option<SelectionTarget>,
}

impl SelectionMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an undelivered selection was replaced.
    pub fn post(&mut self, target: SelectionTarget) -> bool {
        self.pending.replace(target).is_some()
    }

    pub fn take(&mut self) -> Option<SelectionTarget> {
        self.pending.take()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
