use crate::core::shelf::Shelf;
use crate::models::error::ShelfError;
use parking_lot::Mutex;
use std::sync::Arc;

pub fn with_shelf<F, R>(handle: Arc<Mutex<Option<Shelf>>>, f: F) -> Result<R, ShelfError>
where
    F: FnOnce(&Shelf) -> R,
{
    let guard = handle.lock();
    let shelf = guard.as_ref().ok_or(ShelfError::NoActiveShelf)?;
    Ok(f(shelf))
}

pub fn with_shelf_mut<F, R>(handle: Arc<Mutex<Option<Shelf>>>, f: F) -> Result<R, ShelfError>
where
    F: FnOnce(&mut Shelf) -> R,
{
    let mut guard = handle.lock();
    let shelf = guard.as_mut().ok_or(ShelfError::NoActiveShelf)?;
    Ok(f(shelf))
}
