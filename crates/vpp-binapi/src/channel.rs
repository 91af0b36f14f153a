//! Request/reply channel and the dump protocol drivers built on it.
//!
//! A [`Channel`] is a single logical connection to the dataplane. It only
//! moves opaque messages; [`ChannelExt`] layers the three call shapes on top:
//!
//! 1. [`ChannelExt::request`]: one request, one reply
//! 2. [`ChannelExt::dump`]: one request, a stream of details closed by the
//!    transport end marker
//! 3. [`ChannelExt::cursor_dump`]: repeated requests carrying a cursor, each
//!    page closed by a reply holding the next cursor
//!
//! Every driver borrows the channel mutably until its sequence completes, so
//! requests cannot interleave on one connection.

use crate::error::{BinApiError, BinApiResult};
use crate::message::{CursorReply, CursorRequest, DumpRequest, Message, Reply, Request, VppMessage};
use std::marker::PhantomData;
use tracing::trace;

/// Cursor value the dataplane returns once the last page has been sent.
pub const CURSOR_END: u32 = u32::MAX;

/// Transport for dataplane API messages.
pub trait Channel: Send {
    /// Sends a request message.
    fn send(&mut self, request: VppMessage) -> BinApiResult<()>;

    /// Receives the next reply message.
    ///
    /// Returns `Ok(None)` when the transport signals the end of the replies
    /// to the last request.
    fn receive(&mut self) -> BinApiResult<Option<VppMessage>>;
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn send(&mut self, request: VppMessage) -> BinApiResult<()> {
        (**self).send(request)
    }

    fn receive(&mut self) -> BinApiResult<Option<VppMessage>> {
        (**self).receive()
    }
}

fn decode<M: Message>(request: &'static str, msg: VppMessage) -> BinApiResult<M> {
    M::try_from_message(msg).map_err(|other| BinApiError::UnexpectedReply {
        request,
        expected: M::NAME,
        received: other.name(),
    })
}

/// Typed call shapes over any [`Channel`].
pub trait ChannelExt: Channel {
    /// Sends `req` and waits for its single reply.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, a missing or mistyped reply, or a non-zero
    /// return value.
    fn request<R: Request>(&mut self, req: R) -> BinApiResult<R::Reply> {
        self.send(req.into())?;
        let msg = self
            .receive()?
            .ok_or(BinApiError::NoReply { request: R::NAME })?;
        let reply: R::Reply = decode(R::NAME, msg)?;
        BinApiError::check_retval(<R::Reply as Message>::NAME, reply.retval())?;
        Ok(reply)
    }

    /// Sends `req` and returns an iterator over the details replies.
    ///
    /// The iterator ends at the transport end marker. The first error is
    /// yielded once and ends the stream; callers propagate it with `?` so no
    /// partial result escapes.
    fn dump<R: DumpRequest>(&mut self, req: R) -> BinApiResult<DumpStream<'_, Self, R::Details>> {
        self.send(req.into())?;
        Ok(DumpStream {
            channel: self,
            request: R::NAME,
            done: false,
            _marker: PhantomData,
        })
    }

    /// Collects every record of a cursor-paginated listing.
    ///
    /// The first request carries cursor 0. Paging stops when a page reply
    /// returns [`CURSOR_END`] or repeats the cursor that was just sent. The
    /// dataplane answers an empty listing with a repeated cursor of 0 rather
    /// than the sentinel, so both checks are required to terminate.
    fn cursor_dump<R: CursorRequest>(&mut self) -> BinApiResult<Vec<R::Details>> {
        let mut records = Vec::new();
        let mut cursor = 0u32;

        loop {
            self.send(R::with_cursor(cursor).into())?;

            let reply = loop {
                let msg = self
                    .receive()?
                    .ok_or(BinApiError::NoReply { request: R::NAME })?;
                match <R::Details as Message>::try_from_message(msg) {
                    Ok(details) => records.push(details),
                    Err(other) => break decode::<R::Reply>(R::NAME, other)?,
                }
            };
            BinApiError::check_retval(<R::Reply as Message>::NAME, reply.retval())?;

            let next = reply.cursor();
            trace!(request = R::NAME, cursor, next, "received page");
            if next == cursor || next == CURSOR_END {
                return Ok(records);
            }
            cursor = next;
        }
    }
}

impl<C: Channel + ?Sized> ChannelExt for C {}

/// Details stream of a multi-reply request.
pub struct DumpStream<'a, C: ?Sized, D> {
    channel: &'a mut C,
    request: &'static str,
    done: bool,
    _marker: PhantomData<D>,
}

impl<C, D> Iterator for DumpStream<'_, C, D>
where
    C: Channel + ?Sized,
    D: Message,
{
    type Item = BinApiResult<D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.channel.receive() {
            Ok(None) => {
                self.done = true;
                return None;
            }
            Ok(Some(msg)) => decode(self.request, msg),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
