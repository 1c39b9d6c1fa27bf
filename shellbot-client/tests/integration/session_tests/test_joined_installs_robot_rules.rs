use shellbot_client::{MeshCommand, RuleSet};
use shellbot_core::{ParticipantRole, PeerId, SignalMessage};

use crate::integration::{ROBOT_ID, create_test_session, init_tracing};
use crate::utils::{MockSignaling, next_command};

#[tokio::test(start_paused = true)]
async fn test_joined_installs_robot_rules() {
    init_tracing();

    let mut session = create_test_session("demo");
    let (signaling, mut rx) = MockSignaling::new();

    session.handshake(&signaling).await;
    next_command(&mut rx, 1000).await.expect("no readRoom sent");
    session.room_read(&signaling, Some("demo")).await;
    next_command(&mut rx, 1000).await.expect("no robotJoin sent");

    session.joined(&signaling, "demo").await;

    let cmd = next_command(&mut rx, 1000).await.expect("no rule set sent");
    let SignalMessage::AddRuleSet { rules } = cmd.message else {
        panic!("expected addRuleSet, got {:?}", cmd.message);
    };

    let expected = RuleSet::robot(&PeerId::from(ROBOT_ID));
    assert_eq!(rules.len(), 8);
    assert_eq!(rules, expected.rules());

    assert!(matches!(
        session.mesh_rx.recv().await,
        Some(MeshCommand::AttachSignaling(_))
    ));
    match session.mesh_rx.recv().await {
        Some(MeshCommand::InstallRules { local, rules }) => {
            assert_eq!(local.id, PeerId::from(ROBOT_ID));
            assert_eq!(local.role, ParticipantRole::Robot);
            assert_eq!(rules, expected);
        }
        _ => panic!("expected InstallRules"),
    }

    assert_eq!(signaling.rule_sets().await.len(), 1);
}
