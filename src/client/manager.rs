use crate::client::http::ItemBackend;
use crate::client::notifier::Notifier;
use crate::types::dto::items::{Item, ItemRequest};

/// Which call a submit triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

/// Raw form input, as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
        }
    }

    /// All three fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty() && !self.price.is_empty()
    }

    /// Build the request body, or `None` if a field is empty or the price is not a number
    pub fn to_request(&self) -> Option<ItemRequest> {
        if !self.is_complete() {
            return None;
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())?;

        Some(ItemRequest::new(self.name.clone(), self.description.clone(), price))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Local UI state for the item list and the create/edit form
///
/// Every successful mutation is followed by a full re-fetch. Failures show
/// a blocking message and leave the list and the form untouched.
pub struct ItemManager<B, N> {
    backend: B,
    notifier: N,
    items: Vec<Item>,
    form: ItemForm,
    mode: FormMode,
    loading: bool,
}

impl<B: ItemBackend, N: Notifier> ItemManager<B, N> {
    pub fn new(backend: B, notifier: N) -> Self {
        Self {
            backend,
            notifier,
            items: Vec::new(),
            form: ItemForm::default(),
            mode: FormMode::Create,
            loading: false,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Re-fetch the full list
    ///
    /// Returns `false` if the fetch failed; the previous list is kept.
    pub async fn refresh(&mut self) -> bool {
        self.loading = true;
        let result = self.backend.list_items().await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(err) => {
                tracing::error!("Error fetching items: {}", err);
                self.notifier
                    .alert("Error fetching items. Check if backend is running.")
                    .await;
                false
            }
        }
    }

    /// Load an item into the form and switch to edit mode
    pub fn begin_edit(&mut self, item: &Item) {
        self.form = ItemForm::from_item(item);
        self.mode = FormMode::Edit(item.id);
    }

    /// Edit an item from the current list; `false` if it is not listed
    pub fn begin_edit_by_id(&mut self, id: i32) -> bool {
        match self.items.iter().find(|item| item.id == id).cloned() {
            Some(item) => {
                self.begin_edit(&item);
                true
            }
            None => false,
        }
    }

    /// Clear the form and return to create mode. No network call.
    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.mode = FormMode::Create;
    }

    /// Create or update depending on the mode
    ///
    /// Incomplete forms are rejected before any call is made.
    pub async fn submit(&mut self) -> bool {
        let Some(request) = self.form.to_request() else {
            self.notifier.alert("Please fill all fields").await;
            return false;
        };

        let (result, success_message) = match self.mode {
            FormMode::Create => (
                self.backend.create_item(&request).await,
                "Item created successfully!",
            ),
            FormMode::Edit(id) => (
                self.backend.update_item(id, &request).await,
                "Item updated successfully!",
            ),
        };

        match result {
            Ok(item) => {
                tracing::debug!("Saved item {}", item.id);
                self.notifier.alert(success_message).await;
                self.cancel_edit();
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("Error saving item: {}", err);
                self.notifier.alert("Error saving item").await;
                false
            }
        }
    }

    /// Delete after an explicit confirmation
    pub async fn delete(&mut self, id: i32) -> bool {
        if !self
            .notifier
            .confirm("Are you sure you want to delete this item?")
            .await
        {
            return false;
        }

        match self.backend.delete_item(id).await {
            Ok(message) => {
                tracing::debug!("Deleted item {}: {}", id, message);
                self.notifier.alert("Item deleted successfully!").await;
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("Error deleting item: {}", err);
                self.notifier.alert("Error deleting item").await;
                false
            }
        }
    }
}
