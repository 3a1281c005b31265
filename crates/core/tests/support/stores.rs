//! In-memory `CustomerStore` and `CustomerStoreFactory` fakes

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shopbridge_core::{CustomerStore, CustomerStoreFactory, SyncService};
use shopbridge_domain::{
    Config, Customer, CustomerId, CustomerUpdate, NewCustomer, Result as DomainResult,
    ShopBridgeError, StoreCredentials,
};

#[derive(Default)]
struct State {
    customers: Vec<Customer>,
    next_id: u64,
    creates: Vec<NewCustomer>,
    updates: Vec<CustomerUpdate>,
    searches: Vec<String>,
    fail_reads: Option<ShopBridgeError>,
    fail_writes: Option<ShopBridgeError>,
}

/// Mutex-backed store. Writes are applied to the held records and recorded.
///
/// Search mimics the platform's token matching: any record whose email
/// contains the query (ignoring case) is returned, in insertion order.
#[derive(Default)]
pub struct MockCustomerStore {
    state: Mutex<State>,
}

impl MockCustomerStore {
    pub fn new() -> Self {
        Self { state: Mutex::new(State { next_id: 1_000, ..State::default() }) }
    }

    pub fn with_customer(self, customer: Customer) -> Self {
        self.state.lock().unwrap().customers.push(customer);
        self
    }

    pub fn failing_reads(self, err: ShopBridgeError) -> Self {
        self.state.lock().unwrap().fail_reads = Some(err);
        self
    }

    pub fn failing_writes(self, err: ShopBridgeError) -> Self {
        self.state.lock().unwrap().fail_writes = Some(err);
        self
    }

    pub fn creates(&self) -> Vec<NewCustomer> {
        self.state.lock().unwrap().creates.clone()
    }

    pub fn updates(&self) -> Vec<CustomerUpdate> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn write_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.creates.len() + state.updates.len()
    }

    pub fn searches(&self) -> Vec<String> {
        self.state.lock().unwrap().searches.clone()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.state.lock().unwrap().customers.clone()
    }

    pub fn customer(&self, id: u64) -> Option<Customer> {
        self.customers().into_iter().find(|c| c.id == CustomerId::new(id))
    }

    pub fn find_email(&self, email: &str) -> Option<Customer> {
        self.customers().into_iter().find(|c| c.email.as_deref() == Some(email))
    }
}

#[async_trait]
impl CustomerStore for MockCustomerStore {
    async fn get_customer(&self, id: CustomerId) -> DomainResult<Customer> {
        let state = self.state.lock().unwrap();
        if let Some(err) = &state.fail_reads {
            return Err(err.clone());
        }
        state
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ShopBridgeError::NotFound(format!("customer {id}")))
    }

    async fn list_customers(&self, limit: u32) -> DomainResult<Vec<Customer>> {
        let state = self.state.lock().unwrap();
        if let Some(err) = &state.fail_reads {
            return Err(err.clone());
        }
        Ok(state.customers.iter().take(limit as usize).cloned().collect())
    }

    async fn search_by_email(&self, email: &str) -> DomainResult<Vec<Customer>> {
        let mut state = self.state.lock().unwrap();
        state.searches.push(email.to_string());
        if let Some(err) = &state.fail_reads {
            return Err(err.clone());
        }
        let needle = email.to_lowercase();
        Ok(state
            .customers
            .iter()
            .filter(|c| c.email.as_deref().is_some_and(|e| e.to_lowercase().contains(&needle)))
            .cloned()
            .collect())
    }

    async fn create_customer(&self, customer: &NewCustomer) -> DomainResult<Customer> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.fail_writes {
            return Err(err.clone());
        }
        state.creates.push(customer.clone());
        state.next_id += 1;
        let mut created = Customer::new(state.next_id, customer.email.clone())
            .with_tags(customer.tags.clone());
        created.first_name = customer.first_name.clone();
        created.last_name = customer.last_name.clone();
        state.customers.push(created.clone());
        Ok(created)
    }

    async fn update_customer(&self, update: &CustomerUpdate) -> DomainResult<Customer> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.fail_writes {
            return Err(err.clone());
        }
        state.updates.push(update.clone());
        let record = state
            .customers
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| ShopBridgeError::NotFound(format!("customer {}", update.id)))?;
        if update.first_name.is_some() {
            record.first_name.clone_from(&update.first_name);
        }
        if update.last_name.is_some() {
            record.last_name.clone_from(&update.last_name);
        }
        if update.tags.is_some() {
            record.tags.clone_from(&update.tags);
        }
        if update.state.is_some() {
            record.state = update.state;
        }
        Ok(record.clone())
    }
}

/// Hands out pre-registered stores by domain.
#[derive(Default)]
pub struct MockStoreFactory {
    stores: HashMap<String, Arc<MockCustomerStore>>,
}

impl MockStoreFactory {
    pub fn with_store(mut self, domain: &str, store: Arc<MockCustomerStore>) -> Self {
        self.stores.insert(domain.to_string(), store);
        self
    }
}

impl CustomerStoreFactory for MockStoreFactory {
    fn client_for(
        &self,
        domain: &str,
        _access_token: &str,
    ) -> DomainResult<Arc<dyn CustomerStore>> {
        self.stores
            .get(domain)
            .cloned()
            .map(|store| store as Arc<dyn CustomerStore>)
            .ok_or_else(|| ShopBridgeError::Config(format!("no test store for {domain}")))
    }
}

/// Config declaring `keys`, each with domain `<key>.test` and a token.
pub fn config_for(keys: &[&str], primary: &str) -> Config {
    Config {
        store_keys: keys.iter().map(|k| (*k).to_string()).collect(),
        primary_store: primary.to_string(),
        stores: keys
            .iter()
            .map(|k| {
                (
                    (*k).to_string(),
                    StoreCredentials {
                        domain: format!("{}.test", k.to_lowercase()),
                        access_token: format!("token-{k}"),
                    },
                )
            })
            .collect(),
        ..Config::default()
    }
}

/// Primary `A` plus the given secondaries (`B`, `C`, ...), wired into a
/// `SyncService`.
pub struct Harness {
    pub primary: Arc<MockCustomerStore>,
    pub secondaries: Vec<Arc<MockCustomerStore>>,
    pub service: SyncService,
}

impl Harness {
    pub fn new(primary: MockCustomerStore, secondaries: Vec<MockCustomerStore>) -> Self {
        let primary = Arc::new(primary);
        let secondaries: Vec<_> = secondaries.into_iter().map(Arc::new).collect();

        let keys: Vec<String> = std::iter::once("A".to_string())
            .chain((0..secondaries.len()).map(|i| ((b'B' + i as u8) as char).to_string()))
            .collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let config = config_for(&key_refs, "A");

        let mut factory = MockStoreFactory::default().with_store("a.test", Arc::clone(&primary));
        for (key, store) in keys.iter().skip(1).zip(&secondaries) {
            factory = factory.with_store(&format!("{}.test", key.to_lowercase()), Arc::clone(store));
        }

        let service = SyncService::from_config(&config, &factory).unwrap();
        Self { primary, secondaries, service }
    }

    pub fn secondary(&self, index: usize) -> &MockCustomerStore {
        &self.secondaries[index]
    }
}
