use crate::tween::Tween;
use std::time::Duration;

/// Tweens sharing one clock. Every entry carries an explicit start offset
/// from the moment the timeline starts playing.
#[derive(Debug, Clone)]
pub struct Timeline<T, P> {
    pub(crate) entries: Vec<(Duration, Tween<T, P>)>,
}

impl<T, P> Default for Timeline<T, P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T, P> Timeline<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, offset: Duration, tween: Tween<T, P>) -> Self {
        self.entries.push((offset, tween));
        self
    }

    /// Shorthand for [`Timeline::at`] with the offset in seconds.
    pub fn at_secs(self, offset: f64, tween: Tween<T, P>) -> Self {
        self.at(Duration::from_secs_f64(offset.max(0.0)), tween)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End time of the last entry, or `None` if any entry repeats forever.
    pub fn duration(&self) -> Option<Duration> {
        self.entries
            .iter()
            .map(|(offset, tween)| tween.total_duration().map(|d| *offset + d))
            .try_fold(Duration::ZERO, |acc, end| end.map(|e| acc.max(e)))
    }
}

impl<T, P> From<Tween<T, P>> for Timeline<T, P> {
    fn from(tween: Tween<T, P>) -> Self {
        Self::new().at(Duration::ZERO, tween)
    }
}
