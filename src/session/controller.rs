use super::notify::{CREATED_MESSAGE, DELETED_MESSAGE, MODIFIED_MESSAGE, Notice, Notifications};
use crate::connection::hal::embedded_items;
use crate::connection::{BOATS_COLLECTION, BOATS_RESOURCE, SendMethod, Transport, boat_resource};
use crate::core::{Boat, BoatDraft, Result, Selection, SelectionKey, sort_boats};
use std::sync::Arc;
use tracing::{info, warn};

/// A user action submitted to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select(Selection),
    Create(BoatDraft),
    Update(Boat),
    Delete(Boat),
}

/// Owns the boat collection, the current selection and the pending
/// notifications of one authenticated session.
///
/// The collection only changes after the store confirmed the operation, so
/// an error from [`SessionController::dispatch`] leaves every piece of local
/// state as it was.
pub struct SessionController {
    transport: Arc<dyn Transport>,
    boats: Vec<Boat>,
    selection: Selection,
    selection_key: SelectionKey,
    draft_generation: u64,
    notifications: Notifications,
}

impl SessionController {
    /// Fetches the collection once and opens the session on a fresh draft
    ///
    /// ```no_run
    /// use boathouse::{ConnectionConfig, Credentials, HttpTransportFactory, TransportFactory};
    /// use boathouse::session::{Intent, SessionController};
    /// use boathouse::BoatDraft;
    ///
    /// # tokio_test::block_on(async {
    /// let factory = HttpTransportFactory::new(ConnectionConfig::new("http://localhost:8080"));
    /// let transport = factory.build(&Credentials::new("admin", "hunter2")).unwrap();
    ///
    /// let mut session = SessionController::load(transport).await.unwrap();
    /// session
    ///     .dispatch(Intent::Create(BoatDraft::new("Zeta", "A sloop")))
    ///     .await
    ///     .unwrap();
    /// # });
    /// ```
    pub async fn load(transport: Arc<dyn Transport>) -> Result<Self> {
        let boats = fetch_boats(transport.as_ref()).await?;
        info!(count = boats.len(), "boat collection loaded");
        Ok(Self::with_boats(transport, boats))
    }

    /// Opens a session over an already fetched collection
    pub fn with_boats(transport: Arc<dyn Transport>, mut boats: Vec<Boat>) -> Self {
        sort_boats(&mut boats);
        Self {
            transport,
            boats,
            selection: Selection::draft(),
            selection_key: SelectionKey::Draft(0),
            draft_generation: 0,
            notifications: Notifications::new(),
        }
    }

    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_key(&self) -> SelectionKey {
        self.selection_key
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Handles one intent to completion
    pub async fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Select(selection) => {
                self.select(selection);
                Ok(())
            }
            Intent::Create(draft) => self.create(draft).await,
            Intent::Update(boat) => self.update(boat).await,
            Intent::Delete(boat) => self.delete(boat).await,
        }
    }

    fn select(&mut self, selection: Selection) {
        match selection {
            Selection::Draft(draft) => self.select_draft(draft),
            Selection::Record(boat) => {
                // Only entries of the collection can be selected.
                let Some(current) = self.boats.iter().find(|b| b.id == boat.id).cloned() else {
                    warn!(id = boat.id, "ignoring selection of a boat outside the collection");
                    return;
                };
                self.selection_key = SelectionKey::Record(current.id);
                self.selection = Selection::Record(current);
            }
        }
    }

    fn select_draft(&mut self, draft: BoatDraft) {
        self.draft_generation += 1;
        self.selection_key = SelectionKey::Draft(self.draft_generation);
        self.selection = Selection::Draft(draft);
    }

    async fn create(&mut self, draft: BoatDraft) -> Result<()> {
        let body = serde_json::to_value(&draft)?;
        let json = self
            .transport
            .send(BOATS_RESOURCE, SendMethod::Post, &body)
            .await?;
        let boat: Boat = serde_json::from_value(json)?;
        info!(id = boat.id, name = %boat.name, "boat created");

        self.boats.retain(|b| b.id != boat.id);
        self.boats.push(boat.clone());
        sort_boats(&mut self.boats);

        self.selection_key = SelectionKey::Record(boat.id);
        self.selection = Selection::Record(boat);
        self.notifications.push(Notice::success(CREATED_MESSAGE));
        Ok(())
    }

    async fn update(&mut self, boat: Boat) -> Result<()> {
        let body = serde_json::to_value(boat.data())?;
        let json = self
            .transport
            .send(&boat_resource(boat.id), SendMethod::Patch, &body)
            .await?;
        let updated: Boat = serde_json::from_value(json)?;
        info!(id = updated.id, name = %updated.name, "boat modified");

        for entry in self.boats.iter_mut().filter(|b| b.id == updated.id) {
            *entry = updated.clone();
        }
        sort_boats(&mut self.boats);

        if self.selection.id() == Some(updated.id) {
            self.selection = Selection::Record(updated);
        }
        self.notifications.push(Notice::success(MODIFIED_MESSAGE));
        Ok(())
    }

    async fn delete(&mut self, boat: Boat) -> Result<()> {
        self.transport.remove(&boat_resource(boat.id)).await?;
        info!(id = boat.id, "boat deleted");

        self.boats.retain(|b| b.id != boat.id);
        self.select_draft(BoatDraft::default());
        self.notifications.push(Notice::success(DELETED_MESSAGE));
        Ok(())
    }
}

/// Reads the whole collection from the store, sorted by name
pub async fn fetch_boats(transport: &dyn Transport) -> Result<Vec<Boat>> {
    let response = transport.fetch_one(BOATS_RESOURCE).await?;
    let mut boats = embedded_items(response, BOATS_COLLECTION)?
        .into_iter()
        .map(serde_json::from_value::<Boat>)
        .collect::<std::result::Result<Vec<Boat>, _>>()?;
    sort_boats(&mut boats);
    Ok(boats)
}
