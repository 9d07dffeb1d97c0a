use tokio::sync::watch;

/// A value that observers can subscribe to.
///
/// Updates only notify when the new value differs from the current one.
/// Dropping a receiver unsubscribes it.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T> Observable<T>
where
    T: Clone + PartialEq,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self { sender }
    }

    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Borrows the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.sender.borrow())
    }

    /// Stores `value`, returning whether observers were notified.
    pub fn set(&self, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Stores `value` only if the current value satisfies `condition`.
    /// The check and the store happen under one lock.
    pub fn set_if(&self, condition: impl FnOnce(&T) -> bool, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if !condition(current) || *current == value {
                return false;
            }
            *current = value;
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// A handle that can read and subscribe but never write.
    pub fn read_only(&self) -> ReadOnly<'_, T> {
        ReadOnly { inner: self }
    }
}

/// Borrowed view of an [`Observable`] without `set`.
#[derive(Debug)]
pub struct ReadOnly<'a, T> {
    inner: &'a Observable<T>,
}

impl<T> Clone for ReadOnly<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReadOnly<'_, T> {}

impl<T> ReadOnly<'_, T>
where
    T: Clone + PartialEq,
{
    pub fn get(&self) -> T {
        self.inner.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.inner.subscribe()
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + PartialEq + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
