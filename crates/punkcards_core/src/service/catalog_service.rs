//! Catalog use-case service.
//!
//! # Responsibility
//! - Route form submissions to add or update intents.
//! - Track the card currently selected for editing.
//!
//! # Invariants
//! - Invalid drafts never reach the store.
//! - Selection is local state; selecting or cancelling never writes storage.
//! - A successful update or any delete clears the selection.

use crate::form::card_form::{CardForm, FormError};
use crate::model::card::{Card, CardId};
use crate::storage::KeyValueStore;
use crate::store::collection_store::{CollectionStore, StoreError, StoreResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for catalog intents.
#[derive(Debug)]
pub enum CatalogError {
    /// Draft rejected; the message is meant for the user.
    Form(FormError),
    Store(StoreError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<FormError> for CatalogError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What a form submission did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(CardId),
    Updated(CardId),
    /// The selected card was no longer in the collection; nothing changed.
    Unmatched(CardId),
}

/// Collection store plus the edit selection of one front end.
pub struct CatalogService<S: KeyValueStore> {
    store: CollectionStore<S>,
    editing: Option<CardId>,
}

impl<S: KeyValueStore> CatalogService<S> {
    /// Wraps an already loaded store.
    pub fn new(store: CollectionStore<S>) -> Self {
        Self {
            store,
            editing: None,
        }
    }

    /// Opens the store on `storage`/`key`, loading it first.
    pub fn open(storage: S, key: impl Into<String>) -> StoreResult<Self> {
        CollectionStore::open(storage, key).map(Self::new)
    }

    pub fn cards(&self) -> &[Card] {
        self.store.cards()
    }

    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// Card currently selected for editing, if it still exists.
    pub fn editing(&self) -> Option<&Card> {
        self.editing.as_ref().and_then(|id| self.store.get(id))
    }

    /// Selects a card for editing and returns its prefilled form.
    ///
    /// Unknown ids clear the selection and return `None`.
    pub fn select_for_edit(&mut self, id: &CardId) -> Option<CardForm> {
        match self.store.get(id) {
            Some(card) => {
                let form = CardForm::from_card(card);
                self.editing = Some(id.clone());
                Some(form)
            }
            None => {
                self.editing = None;
                None
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submits a draft: updates the selected card, or adds a new one.
    ///
    /// # Errors
    /// - `CatalogError::Form` when the draft is invalid; selection is kept.
    /// - `CatalogError::Store` when the store rejects or fails the write.
    pub fn submit(&mut self, form: &CardForm) -> Result<Submitted, CatalogError> {
        match self.editing.clone() {
            Some(id) => {
                let card = form.build(id.clone())?;
                let matched = self.store.update(card)?;
                self.editing = None;
                if matched {
                    info!("event=card_submit module=service status=ok action=update card_id={id}");
                    Ok(Submitted::Updated(id))
                } else {
                    Ok(Submitted::Unmatched(id))
                }
            }
            None => {
                let id = CardId::generate();
                let card = form.build(id.clone())?;
                self.store.add(card)?;
                info!("event=card_submit module=service status=ok action=add card_id={id}");
                Ok(Submitted::Added(id))
            }
        }
    }

    /// Deletes a card and clears the edit selection.
    pub fn delete(&mut self, id: &CardId) -> Result<bool, CatalogError> {
        let removed = self.store.delete(id)?;
        self.editing = None;
        Ok(removed)
    }
}
