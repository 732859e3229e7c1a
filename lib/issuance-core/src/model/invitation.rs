use shared_types::ConnectionId;

/// Wallet-consumable invitation created by the issuing service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invitation {
    pub invitation_url: String,
    pub connection_id: ConnectionId,
}
