// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! scoped scratch buffers (C9): a short-lived borrow of a typed scratch
//! region, either stack-bounded or rented from a process-wide pool

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// buffers of at most this many elements stay on the stack; longer ones are
/// rented from [`mod@pool`]
const STACK_CAP: usize = 64;

type PoolMap = HashMap<TypeId, &'static (dyn Any + Send + Sync)>;

/// the process-wide typed scratch pool
///
/// allocations are array-shaped (`Vec<T>`); a rented array must be returned
/// exactly once. contents must be assumed uninitialized on rent.
mod pool {
    use super::{Any, PoolMap, TypeId};
    use std::sync::{Mutex, OnceLock};

    static POOLS: OnceLock<Mutex<PoolMap>> = OnceLock::new();

    fn stock<T: 'static + Send>() -> &'static Mutex<Vec<Vec<T>>> {
        // keyed by TypeId so one process-wide map serves every element type
        // this crate's engine ever rents a buffer for
        let pools = POOLS.get_or_init(|| Mutex::new(PoolMap::new()));
        let mut guard = pools.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        // `Box::leak` hands back a genuine `&'static` reference, so the pool
        // entry needs no transmute to recover the lifetime the map drops by
        // storing a type-erased `dyn Any`
        let boxed: &'static (dyn Any + Send + Sync) = *guard
            .entry(TypeId::of::<Vec<Vec<T>>>())
            .or_insert_with(|| {
                let leaked: &'static mut Mutex<Vec<Vec<T>>> = Box::leak(Box::new(Mutex::new(Vec::<Vec<T>>::new())));
                let shared: &'static Mutex<Vec<Vec<T>>> = &*leaked;
                shared as &(dyn Any + Send + Sync)
            });
        boxed
            .downcast_ref()
            .expect("pool entry type mismatch for its own TypeId key")
    }

    /// rents a `Vec<T>` of length exactly `len`, reusing a previously
    /// returned allocation when one of sufficient capacity exists
    pub(super) fn rent<T: 'static + Send + Default + Clone>(len: usize) -> Vec<T> {
        let stock = stock::<T>();
        let mut guard = stock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let reused = !guard.is_empty();
        let mut vec = guard.pop().unwrap_or_default();
        drop(guard);
        log::trace!("renting {len} elements from the scratch pool (reused allocation: {reused})");
        vec.clear();
        vec.resize(len, T::default());
        vec
    }

    /// returns a rented array to the pool for reuse
    pub(super) fn give_back<T: 'static + Send>(mut vec: Vec<T>) {
        log::trace!("returning {} elements to the scratch pool", vec.len());
        vec.clear();
        let stock = stock::<T>();
        let mut guard = stock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.push(vec);
    }
}

/// a short-lived borrow of at least `n` elements of type `T`
///
/// picks an inline, stack-local array when `n` fits the conservative stack
/// budget, and otherwise rents from the process-wide pool. Releases on
/// every exit path (ordinary `Drop`), so callers never need to remember to
/// return it; double-release cannot happen since Rust's ownership rules
/// make a second `Drop` call unreachable.
pub struct ScopedBuffer<T: 'static + Send + Default + Clone> {
    storage: Storage<T>,
    len: usize,
}
enum Storage<T> {
    Stack([T; STACK_CAP]),
    Pooled(Option<Vec<T>>),
}

impl<T: 'static + Send + Default + Clone> ScopedBuffer<T> {
    /// rents a scratch region of at least `len` elements
    pub fn rent(len: usize) -> Self {
        let storage = if len <= STACK_CAP {
            Storage::Stack(std::array::from_fn(|_| T::default()))
        } else {
            Storage::Pooled(Some(pool::rent::<T>(len)))
        };
        Self { storage, len }
    }

    /// the number of elements usable through this buffer
    pub const fn len(&self) -> usize {
        self.len
    }
    /// whether this buffer holds no elements
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// the scratch region as a slice
    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Stack(array) => &array[..self.len],
            Storage::Pooled(vec) => &vec.as_ref().expect("buffer already released")[..self.len],
        }
    }
    /// the scratch region as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.storage {
            Storage::Stack(array) => &mut array[..self.len],
            Storage::Pooled(vec) => {
                &mut vec.as_mut().expect("buffer already released")[..self.len]
            }
        }
    }

    /// releases the buffer back to the pool (if pooled) ahead of drop
    ///
    /// equivalent to letting `self` go out of scope; provided for API
    /// parity with implementations that need an explicit disposal call
    pub fn release(self) {
        drop(self);
    }
}
impl<T: 'static + Send + Default + Clone> Drop for ScopedBuffer<T> {
    fn drop(&mut self) {
        if let Storage::Pooled(vec) = &mut self.storage {
            if let Some(vec) = vec.take() {
                pool::give_back(vec);
            }
        }
    }
}
