//! Contiguous balanced partitioning of the tracker population.

/// Split `items` into exactly `shares` contiguous runs whose sizes differ
/// by at most one: the first `items.len() % shares` runs get the extra
/// element.  13 items across 4 shares gives {4, 3, 3, 3}.
///
/// Every item lands in exactly one share; shares may be empty when there
/// are more workers than items.
pub fn partition<T>(mut items: Vec<T>, shares: usize) -> Vec<Vec<T>> {
    assert!(shares > 0, "partition requires at least one share");

    let total = items.len();
    let base = total / shares;
    let extra = total % shares;

    let mut out = Vec::with_capacity(shares);
    // Split off the tail repeatedly so each share is a contiguous run and
    // no item is ever cloned.
    for i in (0..shares).rev() {
        let size = base + usize::from(i < extra);
        out.push(items.split_off(items.len() - size));
    }
    out.reverse();
    out
}
