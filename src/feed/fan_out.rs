//! Order-preserving fan-out and fan-in of independent fetch units.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::future::join_all;
use futures::stream::{self, StreamExt};

/// Drives every future to completion concurrently and returns their outputs
/// in input order, regardless of completion order.
///
/// With a `limit`, at most that many futures are polled at once. Each unit's
/// output is kept as-is, so a failing unit neither cancels nor blocks its
/// siblings when outputs are `Result`s.
pub(crate) async fn fan_out<I>(
    units: I,
    limit: Option<NonZeroUsize>,
) -> Vec<<I::Item as Future>::Output>
where
    I: IntoIterator,
    I::Item: Future,
{
    match limit {
        None => join_all(units).await,
        Some(limit) => stream::iter(units).buffered(limit.get()).collect().await,
    }
}
