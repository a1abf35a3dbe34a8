use std::sync::{Arc, PoisonError, RwLock};

use mongodb::event::EventHandler;
use mongodb::event::sdam::SdamEvent;
use tracing::debug;

use crate::types::ServerAddress;

/// Live member list of a deployment, fed by the driver's SDAM events.
///
/// Reports the seed list until the driver publishes its first topology
/// description. Afterwards, surviving seeds keep their configured order and
/// discovered members follow in sorted order.
#[derive(Clone, Debug)]
pub struct TopologyTracker {
    seeds: Vec<ServerAddress>,
    known: Arc<RwLock<Option<Vec<ServerAddress>>>>,
}

impl TopologyTracker {
    pub fn new(seeds: Vec<ServerAddress>) -> Self {
        Self {
            seeds,
            known: Arc::new(RwLock::new(None)),
        }
    }

    pub fn seeds(&self) -> &[ServerAddress] {
        &self.seeds
    }

    /// Handler to install as `ClientOptions::sdam_event_handler`.
    pub fn event_handler(&self) -> EventHandler<SdamEvent> {
        let tracker = self.clone();
        EventHandler::callback(move |event: SdamEvent| {
            if let SdamEvent::TopologyDescriptionChanged(changed) = event {
                let servers = changed.new_description.servers();
                tracker.record(servers.keys().map(|addr| ServerAddress::from(*addr)));
            }
        })
    }

    /// Replace the known member list with `members`.
    pub fn record(&self, members: impl IntoIterator<Item = ServerAddress>) {
        let ordered = order_members(&self.seeds, members.into_iter().collect());
        debug!(members = ordered.len(), "topology changed");
        *self.known.write().unwrap_or_else(PoisonError::into_inner) = Some(ordered);
    }

    /// Members currently known to the driver, or the seeds before discovery.
    pub fn current(&self) -> Vec<ServerAddress> {
        let known = self.known.read().unwrap_or_else(PoisonError::into_inner);
        match known.as_ref() {
            Some(members) if !members.is_empty() => members.clone(),
            _ => self.seeds.clone(),
        }
    }
}

fn order_members(seeds: &[ServerAddress], mut members: Vec<ServerAddress>) -> Vec<ServerAddress> {
    let mut ordered: Vec<ServerAddress> = seeds
        .iter()
        .filter(|seed| members.contains(seed))
        .cloned()
        .collect();
    members.retain(|m| !ordered.contains(m));
    members.sort();
    members.dedup();
    ordered.extend(members);
    ordered
}
