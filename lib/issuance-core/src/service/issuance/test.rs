use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mockall::Sequence;
use mockall::predicate::eq;
use shared_types::{ConnectionId, CredentialDefinitionId, CredentialId};
use tokio_util::sync::CancellationToken;

use super::IssuanceService;
use super::dto::{IssueCredentialRequestDTO, PollTarget};
use crate::config::core_config::{PollingConfig, ServiceEndpoints};
use crate::model::connection::ConnectionStatus;
use crate::model::credential::{CredentialAttribute, CredentialState};
use crate::model::invitation::Invitation;
use crate::provider::invitation_presenter::MockInvitationPresenter;
use crate::provider::issuance_service_client::MockIssuanceServiceClient;
use crate::provider::issuance_service_client::error::IssuanceServiceClientError;
use crate::service::error::{ErrorCode, ServiceError};
use crate::util::sleeper::MockSleeper;

const GRACE_PERIOD: Duration = Duration::from_millis(5000);
const POLL_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Default)]
struct Mocks {
    client: MockIssuanceServiceClient,
    sleeper: MockSleeper,
    presenter: MockInvitationPresenter,
    polling: PollingConfig,
}

fn setup_service(mocks: Mocks) -> IssuanceService {
    IssuanceService::new(
        Arc::new(mocks.client),
        Arc::new(mocks.sleeper),
        Arc::new(mocks.presenter),
        dummy_endpoints(),
        mocks.polling,
    )
}

fn dummy_endpoints() -> ServiceEndpoints {
    ServiceEndpoints {
        create_invitation: "http://service.test/v1/invitation-url?alias=trust".to_string(),
        connection_status: "http://service.test/v1/connections/".to_string(),
        create_offer: "http://service.test/v1/create-offer-credential".to_string(),
        credential_state: "http://service.test/v1/credential/".to_string(),
    }
}

fn dummy_invitation(connection_id: &str) -> Invitation {
    Invitation {
        invitation_url: "https://wallet.example/inv/abc".to_string(),
        connection_id: connection_id.into(),
    }
}

fn dummy_request() -> IssueCredentialRequestDTO {
    IssueCredentialRequestDTO {
        credential_definition_id: CredentialDefinitionId::from("def:1:CL:20:tag"),
        attributes: vec![
            CredentialAttribute::new("surname", "Doe"),
            CredentialAttribute::new("given_name", "Jane"),
        ],
    }
}

fn expect_connection_statuses(
    client: &mut MockIssuanceServiceClient,
    sequence: &mut Sequence,
    statuses: &[&str],
) {
    for status in statuses {
        let status: ConnectionStatus = status.parse().unwrap();
        client
            .expect_get_connection_status()
            .once()
            .in_sequence(sequence)
            .withf(|connection_id, endpoint| {
                assert_eq!(connection_id.as_str(), "conn-1");
                assert_eq!(endpoint, "http://service.test/v1/connections/");
                true
            })
            .return_once(move |_, _| Ok(status));
    }
}

fn expect_credential_states(
    client: &mut MockIssuanceServiceClient,
    sequence: &mut Sequence,
    states: &[&str],
) {
    for state in states {
        let state: CredentialState = state.parse().unwrap();
        client
            .expect_get_credential_state()
            .once()
            .in_sequence(sequence)
            .withf(|credential_id, endpoint| {
                assert_eq!(credential_id.as_str(), "cred-1");
                assert_eq!(endpoint, "http://service.test/v1/credential/");
                true
            })
            .return_once(move |_, _| Ok(state));
    }
}

fn expect_sleeps(sleeper: &mut MockSleeper, grace_periods: usize, poll_intervals: usize) {
    sleeper
        .expect_sleep()
        .with(eq(GRACE_PERIOD))
        .times(grace_periods)
        .returning(|_| ());
    sleeper
        .expect_sleep()
        .with(eq(POLL_INTERVAL))
        .times(poll_intervals)
        .returning(|_| ());
}

fn expect_sleep_in_sequence(
    sleeper: &mut MockSleeper,
    sequence: &mut Sequence,
    duration: Duration,
) {
    sleeper
        .expect_sleep()
        .once()
        .in_sequence(sequence)
        .with(eq(duration))
        .return_const(());
}

#[tokio::test]
async fn test_issue_credential_full_flow() {
    let mut mocks = Mocks::default();
    let mut sequence = Sequence::new();

    mocks
        .client
        .expect_create_invitation()
        .once()
        .in_sequence(&mut sequence)
        .withf(|endpoint| endpoint == "http://service.test/v1/invitation-url?alias=trust")
        .return_once(|_| Ok(dummy_invitation("conn-1")));
    mocks
        .presenter
        .expect_present()
        .once()
        .in_sequence(&mut sequence)
        .withf(|invitation| invitation.invitation_url == "https://wallet.example/inv/abc")
        .return_const(());
    expect_sleep_in_sequence(&mut mocks.sleeper, &mut sequence, GRACE_PERIOD);
    expect_connection_statuses(&mut mocks.client, &mut sequence, &["pending"]);
    expect_sleep_in_sequence(&mut mocks.sleeper, &mut sequence, POLL_INTERVAL);
    expect_connection_statuses(&mut mocks.client, &mut sequence, &["pending"]);
    expect_sleep_in_sequence(&mut mocks.sleeper, &mut sequence, POLL_INTERVAL);
    expect_connection_statuses(&mut mocks.client, &mut sequence, &["trusted"]);
    mocks
        .client
        .expect_create_credential_offer()
        .once()
        .in_sequence(&mut sequence)
        .withf(|connection_id, attributes, credential_definition_id, endpoint| {
            assert_eq!(connection_id.as_str(), "conn-1");
            assert_eq!(attributes, dummy_request().attributes.as_slice());
            assert_eq!(credential_definition_id.as_str(), "def:1:CL:20:tag");
            assert_eq!(endpoint, "http://service.test/v1/create-offer-credential");
            true
        })
        .return_once(|_, _, _, _| Ok(CredentialId::from("cred-1")));
    expect_credential_states(&mut mocks.client, &mut sequence, &["offer-sent"]);
    expect_sleep_in_sequence(&mut mocks.sleeper, &mut sequence, POLL_INTERVAL);
    expect_credential_states(&mut mocks.client, &mut sequence, &["done"]);

    let result = setup_service(mocks)
        .issue_credential(dummy_request(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.credential_id, CredentialId::from("cred-1"));
    assert_eq!(result.invitation.connection_id, ConnectionId::from("conn-1"));
    assert_eq!(result.connection_polls, 3);
    assert_eq!(result.credential_polls, 2);
}

#[tokio::test]
async fn test_wait_for_trusted_connection_returns_terminal_status() {
    let mut mocks = Mocks::default();
    let mut sequence = Sequence::new();
    expect_connection_statuses(
        &mut mocks.client,
        &mut sequence,
        &["not-yet-trusted", "abandoned", "not-yet-trusted", "trusted"],
    );
    expect_sleeps(&mut mocks.sleeper, 0, 3);

    let result = setup_service(mocks)
        .wait_for_trusted_connection(&ConnectionId::from("conn-1"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status, ConnectionStatus::Trusted);
    assert_eq!(result.polls, 4);
}

#[tokio::test]
async fn test_connection_failure_state_prevents_offer() {
    let mut mocks = Mocks {
        polling: PollingConfig {
            connection_failure_states: vec!["abandoned".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let mut sequence = Sequence::new();

    mocks
        .client
        .expect_create_invitation()
        .once()
        .return_once(|_| Ok(dummy_invitation("conn-1")));
    expect_connection_statuses(&mut mocks.client, &mut sequence, &["pending", "abandoned"]);
    mocks.client.expect_create_credential_offer().never();
    mocks.client.expect_get_credential_state().never();
    mocks.presenter.expect_present().once().return_const(());
    expect_sleeps(&mut mocks.sleeper, 1, 1);

    let result = setup_service(mocks)
        .issue_credential(dummy_request(), &CancellationToken::new())
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::Connection001);
    assert!(matches!(
        error,
        ServiceError::ConnectionFailed { ref connection_id, ref status }
            if connection_id.as_str() == "conn-1"
                && *status == ConnectionStatus::Other("abandoned".to_string())
    ));
}

#[tokio::test]
async fn test_credential_never_done_stops_at_attempt_cap() {
    let mut mocks = Mocks {
        polling: PollingConfig {
            max_attempts: Some(5),
            ..Default::default()
        },
        ..Default::default()
    };
    mocks
        .client
        .expect_get_credential_state()
        .times(5)
        .returning(|_, _| Ok(CredentialState::OfferSent));
    expect_sleeps(&mut mocks.sleeper, 0, 4);

    let result = setup_service(mocks)
        .wait_for_issued_credential(&CredentialId::from("cred-1"), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::PollingExhausted {
            target: PollTarget::IssuedCredential,
            attempts: 5,
            ref last_value,
        }) if last_value == "offer-sent"
    ));
}

#[tokio::test]
async fn test_credential_failure_state_is_reported() {
    let mut mocks = Mocks {
        polling: PollingConfig {
            credential_failure_states: vec!["declined".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let mut sequence = Sequence::new();
    expect_credential_states(
        &mut mocks.client,
        &mut sequence,
        &["offer-sent", "request-received", "declined"],
    );
    expect_sleeps(&mut mocks.sleeper, 0, 2);

    let result = setup_service(mocks)
        .wait_for_issued_credential(&CredentialId::from("cred-1"), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::CredentialFailed {
            state: CredentialState::Declined,
            ..
        })
    ));
}

#[tokio::test]
async fn test_malformed_offer_response_fails_flow() {
    let mut mocks = Mocks::default();
    mocks
        .client
        .expect_create_invitation()
        .once()
        .return_once(|_| Ok(dummy_invitation("conn-1")));
    mocks
        .client
        .expect_get_connection_status()
        .once()
        .return_once(|_, _| Ok(ConnectionStatus::Trusted));
    mocks
        .client
        .expect_create_credential_offer()
        .once()
        .return_once(|_, _, _, _| {
            Err(IssuanceServiceClientError::MalformedResponse {
                operation: "create credential offer",
                reason: "missing field `id`".to_string(),
            })
        });
    mocks.client.expect_get_credential_state().never();
    mocks.presenter.expect_present().once().return_const(());
    expect_sleeps(&mut mocks.sleeper, 1, 0);

    let result = setup_service(mocks)
        .issue_credential(dummy_request(), &CancellationToken::new())
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::MalformedResponse);
}

#[tokio::test]
async fn test_transport_error_during_poll_is_not_retried() {
    let mut mocks = Mocks::default();
    mocks
        .client
        .expect_get_connection_status()
        .once()
        .return_once(|_, _| {
            Err(IssuanceServiceClientError::Transport(anyhow::anyhow!(
                "connection refused"
            )))
        });
    mocks.sleeper.expect_sleep().never();

    let result = setup_service(mocks)
        .wait_for_trusted_connection(&ConnectionId::from("conn-1"), &CancellationToken::new())
        .await;

    assert_eq!(result.unwrap_err().error_code(), ErrorCode::Transport);
}

#[tokio::test]
async fn test_invitation_error_stops_before_presenting() {
    let mut mocks = Mocks::default();
    mocks
        .client
        .expect_create_invitation()
        .once()
        .return_once(|_| {
            Err(IssuanceServiceClientError::MalformedResponse {
                operation: "create invitation",
                reason: "missing field `invitationUrl`".to_string(),
            })
        });
    mocks.client.expect_get_connection_status().never();
    mocks.presenter.expect_present().never();
    mocks.sleeper.expect_sleep().never();

    let result = setup_service(mocks)
        .issue_credential(dummy_request(), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::ServiceClient(
            IssuanceServiceClientError::MalformedResponse { .. }
        ))
    ));
}

#[tokio::test]
async fn test_cancelled_flow_does_not_poll() {
    let mut mocks = Mocks::default();
    mocks
        .client
        .expect_create_invitation()
        .once()
        .return_once(|_| Ok(dummy_invitation("conn-1")));
    mocks.client.expect_get_connection_status().never();
    mocks.presenter.expect_present().once().return_const(());
    mocks.sleeper.expect_sleep().returning(|_| ());

    let cancellation_token = CancellationToken::new();
    cancellation_token.cancel();

    let result = setup_service(mocks)
        .issue_credential(dummy_request(), &cancellation_token)
        .await;

    assert!(matches!(result, Err(ServiceError::Cancelled)));
}

#[tokio::test]
async fn test_parallel_flows_are_independent() {
    let mut mocks = Mocks::default();

    let invitations = Arc::new(AtomicUsize::new(0));
    mocks
        .client
        .expect_create_invitation()
        .times(2)
        .returning(move |_| {
            let index = invitations.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(dummy_invitation(&format!("conn-{index}")))
        });
    mocks
        .client
        .expect_get_connection_status()
        .times(2)
        .returning(|_, _| Ok(ConnectionStatus::Trusted));
    mocks
        .client
        .expect_create_credential_offer()
        .times(2)
        .returning(|connection_id, _, _, _| {
            let suffix = connection_id.as_str().trim_start_matches("conn-");
            Ok(CredentialId::from(format!("cred-{suffix}")))
        });
    mocks
        .client
        .expect_get_credential_state()
        .times(2)
        .returning(|_, _| Ok(CredentialState::Done));
    mocks.presenter.expect_present().times(2).return_const(());
    mocks.sleeper.expect_sleep().returning(|_| ());

    let service = setup_service(mocks);
    let other_service = service.clone();
    let cancellation_token = CancellationToken::new();
    let (first, second) = futures::join!(
        service.issue_credential(dummy_request(), &cancellation_token),
        other_service.issue_credential(dummy_request(), &cancellation_token),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_ne!(first.credential_id, second.credential_id);
    assert_eq!(
        first.credential_id.as_str().trim_start_matches("cred-"),
        first
            .invitation
            .connection_id
            .as_str()
            .trim_start_matches("conn-")
    );
    assert_eq!(
        second.credential_id.as_str().trim_start_matches("cred-"),
        second
            .invitation
            .connection_id
            .as_str()
            .trim_start_matches("conn-")
    );
}
