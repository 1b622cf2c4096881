//! Per-page bookkeeping of in-flight requests.
//!
//! Joins the request half (method, headers, post body) with the response half
//! (url, status, content type) of each request id, and answers "is the
//! network idle", i.e. nothing in flight. Ids that already finished or
//! failed are remembered so a late `requestWillBeSent` cannot leave a
//! request in flight forever.

use std::collections::{HashMap, HashSet};

use crate::error::ResponseError;
use crate::model::ResponseEvent;

/// Request half as announced by `Network.requestWillBeSent`.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestInfo {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub post_body: Option<String>,
    /// Request has a body the event did not carry; fetch it with `Network.getRequestPostData`.
    pub post_body_pending: bool,
}

/// A response whose body is ready to be fetched.
#[derive(Debug)]
pub(crate) struct Finished {
    pub event: ResponseEvent,
    pub post_body_pending: bool,
}

#[derive(Debug)]
struct InFlight {
    url: String,
    /// `None` when the request could not be read; still counts as in flight.
    request: Option<RequestInfo>,
    response: Option<ResponseEvent>,
}

#[derive(Debug, Default)]
pub(crate) struct NetworkTracker {
    in_flight: HashMap<String, InFlight>,
    done: HashSet<String>,
}

impl NetworkTracker {
    /// A new request (or the next hop of a redirect chain, which reuses the id).
    pub fn request_sent(&mut self, id: String, url: String, request: RequestInfo) {
        if self.done.contains(&id) {
            tracing::debug!(request_id = %id, %url, "request announced after it finished");
            return;
        }
        self.in_flight.insert(
            id,
            InFlight {
                url,
                request: Some(request),
                response: None,
            },
        );
    }

    /// Track a request whose details could not be read, so it still delays idle.
    pub fn request_unreadable(&mut self, id: String, url: String) {
        if self.done.contains(&id) {
            return;
        }
        self.in_flight.insert(
            id,
            InFlight {
                url,
                request: None,
                response: None,
            },
        );
    }

    /// Attach response metadata to a known request.
    pub fn response_received(
        &mut self,
        id: &str,
        url: String,
        status: u16,
        content_type: String,
    ) -> Result<(), ResponseError> {
        let entry = self
            .in_flight
            .get_mut(id)
            .ok_or_else(|| ResponseError::UnknownRequest {
                request_id: id.to_string(),
            })?;
        let Some(request) = entry.request.as_ref() else {
            return Ok(());
        };
        entry.url = url.clone();
        entry.response = Some(ResponseEvent {
            method: request.method.clone(),
            request_headers: request.headers.clone(),
            post_body: request.post_body.clone(),
            url,
            status,
            content_type,
            body_text: None,
        });
        Ok(())
    }

    /// Body is complete: stop tracking and hand back the event to fill, if any.
    pub fn loading_finished(&mut self, id: &str) -> Option<Finished> {
        self.done.insert(id.to_string());
        let entry = self.in_flight.remove(id)?;
        let post_body_pending = entry
            .request
            .as_ref()
            .is_some_and(|r| r.post_body_pending);
        entry.response.map(|event| Finished {
            event,
            post_body_pending,
        })
    }

    /// Request failed or was cancelled: stop tracking; returns its URL.
    pub fn loading_failed(&mut self, id: &str) -> Option<String> {
        self.done.insert(id.to_string());
        self.in_flight.remove(id).map(|f| f.url)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}
