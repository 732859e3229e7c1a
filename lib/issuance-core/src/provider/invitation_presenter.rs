use crate::model::invitation::Invitation;

/// Hands a fresh invitation to whoever brings it to the wallet (printed, rendered as a
/// scannable code, ...). Called once per flow, before the connection wait starts.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait InvitationPresenter: Send + Sync {
    fn present(&self, invitation: &Invitation);
}

/// Logs the invitation URL, for setups where the operator watches the log output.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingInvitationPresenter;

impl InvitationPresenter for LoggingInvitationPresenter {
    fn present(&self, invitation: &Invitation) {
        tracing::info!(
            connection_id = %invitation.connection_id,
            "Invitation created: {}",
            invitation.invitation_url
        );
    }
}
