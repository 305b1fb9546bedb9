//! Home lifecycle operations and ledger seeding.

use super::repository::{decode_home, encode_home, encode_tower};
use super::RegistryService;
use crate::domain::entities::{Home, HomeRecord, Tower};
use crate::domain::errors::RegistryError;
use crate::domain::keys::KeyPrefix;
use crate::ports::inbound::HomeLifecycleApi;
use crate::ports::outbound::{LedgerError, LedgerStore, WriteBatch};

/// The fixture set written by `init_ledger`.
fn seed_homes() -> Vec<Home> {
    let mut homes = Vec::with_capacity(8);

    for unit in ["101", "102", "103"] {
        let mut home = Home::new(unit, "A", 1);
        home.book(format!("customer.{unit}@example.com"));
        homes.push(home);
    }
    homes.push(Home::new("104", "A", 1));

    for unit in ["201", "202", "203", "204"] {
        let mut home = Home::new(unit, "B", 1);
        home.book(format!("customer.{unit}@example.com"));
        home.builder_perc = 80;
        home.customer_perc = 20;
        homes.push(home);
    }

    homes
}

fn seed_towers() -> Vec<Tower> {
    ["A", "B", "C"].into_iter().map(Tower::new).collect()
}

impl<L: LedgerStore> HomeLifecycleApi for RegistryService<L> {
    fn init_ledger(&mut self) -> Result<(), RegistryError> {
        let homes = seed_homes();
        let towers = seed_towers();

        let mut batch = WriteBatch::new();
        for home in &homes {
            batch.put(KeyPrefix::home_key(&home.name), encode_home(home)?);
        }
        for tower in &towers {
            batch.put(KeyPrefix::tower_key(&tower.id), encode_tower(tower)?);
        }
        self.ledger.commit(batch)?;

        tracing::info!(
            "[registry] seeded ledger with {} homes, {} towers",
            homes.len(),
            towers.len()
        );
        Ok(())
    }

    fn query_home(&self, id: &str) -> Result<Vec<u8>, RegistryError> {
        // Absent key is success with an empty payload, by contract.
        let bytes = self.ledger.get(&KeyPrefix::home_key(id))?;
        Ok(bytes.unwrap_or_default())
    }

    fn create_home(&mut self, id: &str, tower_id: &str, floor: u32) -> Result<(), RegistryError> {
        let home = Home::new(id, tower_id, floor);

        let mut batch = WriteBatch::new();
        let key = KeyPrefix::home_key(id);
        batch.expect_absent(&key);
        batch.put(&key, encode_home(&home)?);

        match self.ledger.commit(batch) {
            Ok(()) => {
                tracing::info!("[registry] created home {id:?} in tower {tower_id:?}");
                Ok(())
            }
            Err(LedgerError::VersionConflict { .. }) => Err(RegistryError::AlreadyExists {
                id: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn query_all_homes(&self) -> Result<Vec<HomeRecord>, RegistryError> {
        let rows = self.ledger.prefix_scan(KeyPrefix::Home.as_str())?;

        let mut records = Vec::with_capacity(rows.len());
        for (key, value) in rows {
            let record = decode_home(&key, &value)?;
            let name = KeyPrefix::Home
                .strip(&key)
                .unwrap_or(key.as_str())
                .to_string();
            records.push(HomeRecord { key: name, record });
        }
        Ok(records)
    }

    fn change_home_ownership(
        &mut self,
        id: &str,
        new_customer: &str,
    ) -> Result<(), RegistryError> {
        self.commit_with_retry("changeHomeOwnership", |svc| {
            let (mut home, version) =
                svc.load_home(id)?
                    .ok_or_else(|| RegistryError::NotFound {
                        kind: "home",
                        id: id.to_string(),
                    })?;
            home.book(new_customer);

            let key = KeyPrefix::home_key(id);
            let mut batch = WriteBatch::new();
            batch.expect(&key, version);
            batch.put(&key, encode_home(&home)?);
            Ok(batch)
        })?;

        tracing::info!("[registry] home {id:?} booked by {new_customer:?}");
        Ok(())
    }
}
