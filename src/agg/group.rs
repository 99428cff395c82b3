use super::{stream::Aggregation, DayBucket};
use crate::agg::stream::Aggregator;

/// A dictionary of aggregators, one per group, each covering the full window.
///
/// Call `.collect()` to finish all aggregators into one result.
pub struct GroupedAggregation<A: Aggregation>(pub(crate) crate::HashMap<String, Aggregator<A>>);

impl<A: Aggregation> std::ops::Deref for GroupedAggregation<A> {
    type Target = crate::HashMap<String, Aggregator<A>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A: Aggregation> IntoIterator for GroupedAggregation<A> {
    type Item = (String, Aggregator<A>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Aggregator<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<A: Aggregation> GroupedAggregation<A> {
    /// Finishes all groups, returning a dictionary of time series data,
    /// mapping each group to its buckets (`DayBucket`), oldest first.
    #[must_use]
    pub fn collect(self) -> crate::HashMap<String, Vec<DayBucket>> {
        let mut map =
            crate::HashMap::with_capacity_and_hasher(self.0.len(), rustc_hash::FxBuildHasher);

        for (group, aggregator) in self.0 {
            map.insert(group, aggregator.finish());
        }

        map
    }
}
