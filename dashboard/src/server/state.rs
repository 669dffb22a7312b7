//! Server state

use std::sync::Arc;

use crate::proxy::forward::ProxyForwarder;
use crate::sync::refresher::Refresher;
use crate::view::layout::DEFAULT_SPACING;

/// Server state shared across handlers
pub struct ServerState {
    pub forwarder: Arc<ProxyForwarder>,
    pub refresher: Arc<Refresher>,
    pub layout_spacing: f64,
}

impl ServerState {
    pub fn new(forwarder: Arc<ProxyForwarder>, refresher: Arc<Refresher>) -> Self {
        Self {
            forwarder,
            refresher,
            layout_spacing: DEFAULT_SPACING,
        }
    }
}
