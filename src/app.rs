//! The app itself: reducer-style `update` plus the pure `view` projection.
//! All remote work goes through capabilities and comes back as events; a
//! response is applied only if its request token is still the outstanding
//! one, so superseded and cancelled requests are discarded, not raced.

use tracing::{debug, warn};

use crate::capabilities::Capabilities;
use crate::config::ApiConfig;
use crate::error::{ack_response, decode_response, TransportError};
use crate::event::Event;
use crate::filter::FilterCriteria;
use crate::form::ListingDraft;
use crate::model::{ListingId, Model};
use crate::view::ViewModel;
use crate::{pagination, DRAFT_KEY, PAGE_SIZE};

const LOAD_LISTINGS: &str = "Loading listings";
const LOAD_LISTING: &str = "Loading the listing";
const CREATE_LISTING: &str = "Creating the listing";
const UPDATE_LISTING: &str = "Updating the listing";
const DELETE_LISTING: &str = "Deleting the listing";

#[derive(Default)]
pub struct App;

impl App {
    fn fetch_listings(model: &mut Model, caps: &Capabilities) {
        let url = model.api.items_url();
        let token = model.listings.status.begin();
        caps.http
            .get(url)
            .expect_json()
            .send(move |response| Event::ListingsFetched {
                token,
                response: Box::new(response),
            });
    }

    fn fetch_listing(id: ListingId, model: &mut Model, caps: &Capabilities) {
        let url = model.api.item_url(id);
        let token = model.current.status.begin();
        caps.http
            .get(url)
            .expect_json()
            .send(move |response| Event::ListingFetched {
                token,
                response: Box::new(response),
            });
    }

    /// Validates the draft and issues a create or an update, selected by
    /// whether an id is being edited. Validation failures stay local.
    fn submit_draft(model: &mut Model, caps: &Capabilities) {
        let payload = match model.draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                model.form_error = Some(err.to_string());
                caps.render.render();
                return;
            }
        };
        model.form_error = None;

        if let Some(id) = model.editing {
            let url = model.api.item_url(id);
            let body = payload.into_listing(id);
            match caps.http.put(url).body_json(&body) {
                Ok(request) => {
                    let token = model.listings.status.begin();
                    request.expect_json().send(move |response| Event::Updated {
                        token,
                        response: Box::new(response),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "failed to encode update request");
                    model
                        .listings
                        .status
                        .fail(TransportError::Unknown.user_message(UPDATE_LISTING));
                }
            }
        } else {
            let url = model.api.items_url();
            match caps.http.post(url).body_json(&payload) {
                Ok(request) => {
                    let token = model.listings.status.begin();
                    request.expect_json().send(move |response| Event::Created {
                        token,
                        response: Box::new(response),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "failed to encode create request");
                    model
                        .listings
                        .status
                        .fail(TransportError::Unknown.user_message(CREATE_LISTING));
                }
            }
        }

        caps.render.render();
    }

    /// Best-effort write of the in-progress draft. Only new listings are
    /// cached; edits always start from the server record.
    fn persist_draft(model: &Model, caps: &Capabilities) {
        if model.editing.is_some() {
            return;
        }
        match serde_json::to_vec(&model.draft) {
            Ok(bytes) => caps
                .key_value
                .set(DRAFT_KEY.to_string(), bytes, Event::DraftStored),
            Err(err) => warn!(error = %err, "draft serialization failed"),
        }
    }

    fn clamp_page(model: &mut Model) {
        model.page = pagination::clamp_page(model.page, model.matching_count(), PAGE_SIZE);
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    #[allow(clippy::too_many_lines)]
    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        match event {
            Event::AppStarted { api_base } => {
                if let Some(base) = api_base {
                    match ApiConfig::new(base) {
                        Ok(api) => model.api = api,
                        Err(err) => warn!(error = %err, "ignoring invalid API base override"),
                    }
                }
                Self::fetch_listings(model, caps);
                caps.render.render();
            }

            Event::RefreshRequested => {
                Self::fetch_listings(model, caps);
                caps.render.render();
            }

            Event::ListingsFetched { token, response } => {
                if !model.listings.status.accept(token) {
                    debug!("discarding stale listings response");
                    return;
                }
                match decode_response(*response) {
                    Ok(items) => {
                        model.listings.items = items;
                        model.listings.status.succeed();
                        Self::clamp_page(model);
                    }
                    Err(err) => model
                        .listings
                        .status
                        .fail(err.user_message(LOAD_LISTINGS)),
                }
                caps.render.render();
            }

            Event::CategorySelected { category } => {
                model.filters.category = category;
                model.page = 0;
                caps.render.render();
            }

            Event::SearchChanged { text } => {
                model.filters.search = text;
                model.page = 0;
                caps.render.render();
            }

            Event::FilterChanged { field, value } => {
                model.filters.set(field, value);
                model.page = 0;
                caps.render.render();
            }

            Event::FiltersCleared => {
                model.filters = FilterCriteria::default();
                model.page = 0;
                caps.render.render();
            }

            Event::PageSelected { page } => {
                model.page = pagination::clamp_page(page, model.matching_count(), PAGE_SIZE);
                caps.render.render();
            }

            Event::ListingOpened { id } => {
                Self::fetch_listing(id, model, caps);
                caps.render.render();
            }

            Event::ListingClosed => {
                // Also invalidates any in-flight token, so a late response
                // for the closed view is dropped.
                model.current.clear();
                caps.render.render();
            }

            Event::ListingFetched { token, response } => {
                if !model.current.status.accept(token) {
                    debug!("discarding stale listing response");
                    return;
                }
                match decode_response(*response) {
                    Ok(item) => {
                        if model.editing == Some(item.id) {
                            model.draft = ListingDraft::from_listing(&item);
                        }
                        model.current.item = Some(item);
                        model.current.status.succeed();
                    }
                    Err(err) => model.current.status.fail(err.user_message(LOAD_LISTING)),
                }
                caps.render.render();
            }

            Event::DeleteRequested { id } => {
                let url = model.api.item_url(id);
                let token = model.current.status.begin();
                caps.http.delete(url).send(move |response| Event::Deleted {
                    id,
                    token,
                    response: Box::new(response),
                });
                caps.render.render();
            }

            Event::Deleted {
                id,
                token,
                response,
            } => {
                if !model.current.status.accept(token) {
                    debug!("discarding stale delete response");
                    return;
                }
                match ack_response(*response) {
                    Ok(()) => {
                        model.current.item = None;
                        model.current.status.succeed();
                        model.listings.remove(id);
                        Self::clamp_page(model);
                    }
                    Err(err) => model.current.status.fail(err.user_message(DELETE_LISTING)),
                }
                caps.render.render();
            }

            Event::CreateFormOpened => {
                model.editing = None;
                model.form_error = None;
                model.draft = ListingDraft::default();
                caps.key_value
                    .get(DRAFT_KEY.to_string(), Event::DraftLoaded);
                caps.render.render();
            }

            Event::EditFormOpened { id } => {
                model.editing = Some(id);
                model.form_error = None;
                let existing = model.find_listing(id).cloned();
                if let Some(listing) = existing {
                    model.draft = ListingDraft::from_listing(&listing);
                } else {
                    // Deep link to an edit form: load the record first; the
                    // draft is populated when the response lands.
                    model.draft = ListingDraft::default();
                    Self::fetch_listing(id, model, caps);
                }
                caps.render.render();
            }

            Event::DraftChanged(draft) => {
                model.draft = *draft;
                model.form_error = None;
                Self::persist_draft(model, caps);
                caps.render.render();
            }

            Event::DraftLoaded(result) => {
                match result {
                    Ok(Some(bytes)) => match serde_json::from_slice::<ListingDraft>(&bytes) {
                        Ok(draft) => {
                            if model.editing.is_none() {
                                model.draft = draft;
                            }
                        }
                        Err(err) => warn!(error = %err, "stored draft is unreadable, ignoring"),
                    },
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "draft read failed"),
                }
                caps.render.render();
            }

            Event::DraftCleared => {
                model.draft = ListingDraft::default();
                model.form_error = None;
                caps.key_value
                    .delete(DRAFT_KEY.to_string(), Event::DraftStored);
                caps.render.render();
            }

            Event::DraftStored(result) => {
                // Best-effort cache: failures are logged, never surfaced.
                if let Err(err) = result {
                    warn!(error = %err, "draft write failed");
                }
            }

            Event::SubmitRequested => Self::submit_draft(model, caps),

            Event::Created { token, response } => {
                if !model.listings.status.accept(token) {
                    debug!("discarding stale create response");
                    return;
                }
                match decode_response(*response) {
                    Ok(created) => {
                        model.listings.items.push(created);
                        model.listings.status.succeed();
                        model.draft = ListingDraft::default();
                        caps.key_value
                            .delete(DRAFT_KEY.to_string(), Event::DraftStored);
                    }
                    Err(err) => model
                        .listings
                        .status
                        .fail(err.user_message(CREATE_LISTING)),
                }
                caps.render.render();
            }

            Event::Updated { token, response } => {
                if !model.listings.status.accept(token) {
                    debug!("discarding stale update response");
                    return;
                }
                match decode_response(*response) {
                    Ok(updated) => {
                        model.listings.replace(updated);
                        model.listings.status.succeed();
                        model.editing = None;
                        // The persisted draft belongs to the create flow;
                        // an update leaves it alone.
                        model.draft = ListingDraft::default();
                    }
                    Err(err) => model
                        .listings
                        .status
                        .fail(err.user_message(UPDATE_LISTING)),
                }
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_model(model)
    }
}
