//! Contiguous-run operations shared by every mirror of a child list.
//!
//! The producer's bookkeeping, the display's id mirror and concrete widget
//! collections all apply `Move` and `Remove` through these functions so that
//! every side evolves the same child order.

use thiserror::Error;

/// A contiguous run that does not fit the list it targets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Insert index {index} out of bounds for {len} children")]
    InsertOutOfBounds { index: usize, len: usize },

    #[error("Run {index}..{index}+{count} out of bounds for {len} children")]
    RunOutOfBounds {
        index: usize,
        count: usize,
        len: usize,
    },

    #[error("Move destination {to_index} falls inside run {from_index}..{from_index}+{count}")]
    DestinationInsideRun {
        from_index: usize,
        to_index: usize,
        count: usize,
    },

    #[error("Move destination {to_index} out of bounds for {len} children")]
    DestinationOutOfBounds { to_index: usize, len: usize },
}

/// Where a run starting at `from_index` lands after a move to `to_index`.
///
/// `to_index` is measured before the run is taken out of the list, so moving
/// forward shifts the landing position back by `count`.
pub fn move_destination(from_index: usize, to_index: usize, count: usize) -> usize {
    if to_index <= from_index {
        to_index
    } else {
        to_index - count
    }
}

pub fn check_insert(index: usize, len: usize) -> Result<(), RangeError> {
    if index > len {
        return Err(RangeError::InsertOutOfBounds { index, len });
    }
    Ok(())
}

pub fn check_run(index: usize, count: usize, len: usize) -> Result<(), RangeError> {
    match index.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(RangeError::RunOutOfBounds { index, count, len }),
    }
}

pub fn check_move(
    from_index: usize,
    to_index: usize,
    count: usize,
    len: usize,
) -> Result<(), RangeError> {
    check_run(from_index, count, len)?;
    if to_index > len {
        return Err(RangeError::DestinationOutOfBounds { to_index, len });
    }
    if to_index > from_index && to_index < from_index + count {
        return Err(RangeError::DestinationInsideRun {
            from_index,
            to_index,
            count,
        });
    }
    Ok(())
}

pub fn insert_at<T>(list: &mut Vec<T>, index: usize, item: T) -> Result<(), RangeError> {
    check_insert(index, list.len())?;
    list.insert(index, item);
    Ok(())
}

/// Relocates `list[from_index..from_index + count]` so the run starts at
/// [`move_destination`].
pub fn move_range<T>(
    list: &mut Vec<T>,
    from_index: usize,
    to_index: usize,
    count: usize,
) -> Result<(), RangeError> {
    check_move(from_index, to_index, count, list.len())?;
    let run: Vec<T> = list.drain(from_index..from_index + count).collect();
    let destination = move_destination(from_index, to_index, count);
    list.splice(destination..destination, run);
    Ok(())
}

/// Takes `list[index..index + count]` out of the list and returns it in order.
pub fn remove_range<T>(
    list: &mut Vec<T>,
    index: usize,
    count: usize,
) -> Result<Vec<T>, RangeError> {
    check_run(index, count, list.len())?;
    Ok(list.drain(index..index + count).collect())
}
