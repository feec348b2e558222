//! Greedy fragment merging.

use crate::cascade::Fragment;

/// Merge consecutive fragments while their combined size fits `chunk_size`.
///
/// Left to right and order-preserving. A fragment that is already over the
/// limit flushes the accumulator and passes through untouched so a finer
/// separator can attack it. Empty fragments are dropped.
pub(crate) fn merge_fragments(fragments: Vec<Fragment>, chunk_size: usize) -> Vec<Fragment> {
    let mut merged = Vec::with_capacity(fragments.len());
    let mut current: Option<Fragment> = None;

    for fragment in fragments {
        if fragment.size > chunk_size {
            flush(&mut merged, current.take());
            merged.push(fragment);
            continue;
        }

        current = match current.take() {
            Some(mut acc) if acc.size + fragment.size <= chunk_size => {
                acc.absorb(fragment);
                Some(acc)
            }
            Some(acc) => {
                flush(&mut merged, Some(acc));
                Some(fragment)
            }
            None => Some(fragment),
        };
    }

    flush(&mut merged, current);
    merged
}

fn flush(merged: &mut Vec<Fragment>, fragment: Option<Fragment>) {
    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        merged.push(fragment);
    }
}
