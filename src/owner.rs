use crate::{Error, IdMap, ItemId, NodeRef, Result};
use std::{fmt, sync::mpsc, thread};

/// Cloneable handle to an [`IdMap`] confined to a dedicated owner thread.
///
/// The map itself is single-threaded; this is the serialization layer for
/// everyone else. [`spawn`](Self::spawn) starts a thread that owns the map,
/// and every handle routes its requests there, one at a time, in send order.
///
/// The owner exits when [`close`](Self::close) is called or when the last
/// handle is dropped. After that, every call fails with
/// [`ErrorKind::OwnerClosed`](crate::ErrorKind::OwnerClosed).
///
/// Cancelling an in-flight call drops the reply, not the request: the owner
/// may still apply the operation.
///
/// # Example
///
/// ```
/// # futures::executor::block_on(async {
/// let handle = hiermap::MapHandle::spawn();
///
/// let root = std::sync::Arc::new("root");
/// let id = handle.allocate(root.clone()).await?;
///
/// assert!(handle.lookup(id.get()).await?.is_some());
///
/// handle.release(root, id).await?;
/// handle.close().await?;
/// # hiermap::Result::<()>::Ok(())
/// # }).unwrap();
/// ```
pub struct MapHandle<N> {
    tx: mpsc::Sender<Request<N>>,
}

impl<N> Clone for MapHandle<N> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<N> fmt::Debug for MapHandle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHandle").finish_non_exhaustive()
    }
}

enum Request<N> {
    Allocate {
        node: N,
        tx: oneshot::Sender<ItemId>,
    },
    Release {
        node: N,
        id: ItemId,
        tx: oneshot::Sender<Result<()>>,
    },
    Lookup {
        raw: u32,
        tx: oneshot::Sender<Option<N>>,
    },
    Close {
        tx: Option<oneshot::Sender<()>>,
    },
}

impl<N> MapHandle<N>
where
    N: NodeRef + Clone + Send + 'static,
{
    /// Spawns an owner thread holding an empty map and returns a handle.
    pub fn spawn() -> Self {
        let (tx_req, rx_req) = mpsc::channel::<Request<N>>();

        thread::spawn(move || {
            let mut map = IdMap::new();

            while let Ok(x) = rx_req.recv() {
                match x {
                    Request::Allocate { node, tx } => {
                        let _ = tx.send(map.allocate(node));
                    }
                    Request::Release { node, id, tx } => {
                        let _ = tx.send(map.release(&node, id));
                    }
                    Request::Lookup { raw, tx } => {
                        let _ = tx.send(map.lookup(raw).cloned());
                    }
                    Request::Close { tx } => {
                        if let Some(tx) = tx {
                            let _ = tx.send(());
                        }

                        return;
                    }
                }
            }
        });

        Self { tx: tx_req }
    }

    /// Registers `node` with the owner's map. See [`IdMap::allocate`].
    ///
    /// Allocating a node that is already registered is a caller bug: it kills
    /// the owner thread, and this and every later call report
    /// [`ErrorKind::OwnerClosed`](crate::ErrorKind::OwnerClosed).
    pub async fn allocate(&self, node: N) -> Result<ItemId> {
        let (tx, rx) = oneshot::channel();

        self.tx
            .send(Request::Allocate { node, tx })
            .map_err(|_| Error::owner_gone())?;

        rx.await.map_err(|_| Error::owner_gone())
    }

    /// Removes `node` from the owner's map. See [`IdMap::release`].
    pub async fn release(&self, node: N, id: ItemId) -> Result<()> {
        let (tx, rx) = oneshot::channel();

        self.tx
            .send(Request::Release { node, id, tx })
            .map_err(|_| Error::owner_gone())?;

        rx.await.map_err(|_| Error::owner_gone())?
    }

    /// Returns a clone of the node registered under the raw handle value
    /// `raw`, if any. See [`IdMap::lookup`].
    pub async fn lookup(&self, raw: u32) -> Result<Option<N>> {
        let (tx, rx) = oneshot::channel();

        self.tx
            .send(Request::Lookup { raw, tx })
            .map_err(|_| Error::owner_gone())?;

        rx.await.map_err(|_| Error::owner_gone())
    }

    /// Stops the owner thread and waits for it to acknowledge.
    ///
    /// Requests already queued ahead of the close are still served.
    pub async fn close(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();

        self.tx
            .send(Request::Close { tx: Some(tx) })
            .map_err(|_| Error::owner_gone())?;

        rx.await.map_err(|_| Error::owner_gone())
    }

    /// Stops the owner thread without waiting for it.
    pub fn close_now(&self) {
        let _ = self.tx.send(Request::Close { tx: None });
    }
}
