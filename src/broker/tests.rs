use super::{AckMode, BrokerConnection, BrokerError, InMemoryBroker};

#[tokio::test]
async fn test_subscribe_publish_ack_roundtrip() {
    let broker = InMemoryBroker::new();
    let mut sub = broker.subscribe("logs", AckMode::Manual).await.unwrap();

    broker.publish("logs", br#"{"uuid":"u-1"}"#).unwrap();

    let delivery = sub.recv().await.unwrap();
    assert_eq!(delivery.queue, "logs");
    assert_eq!(delivery.body, br#"{"uuid":"u-1"}"#);
    assert_eq!(broker.acked("logs"), 0);

    delivery.ack.ack().unwrap();
    assert_eq!(broker.acked("logs"), 1);
}

#[tokio::test]
async fn test_deliveries_preserve_publish_order() {
    let broker = InMemoryBroker::new();
    let mut sub = broker.subscribe("logs.0", AckMode::Manual).await.unwrap();

    broker.publish("logs.0", b"first").unwrap();
    broker.publish("logs.0", b"second").unwrap();
    broker.publish("logs.0", b"third").unwrap();

    for expected in [b"first".as_slice(), b"second", b"third"] {
        let delivery = sub.recv().await.unwrap();
        assert_eq!(delivery.body, expected);
    }
}

#[tokio::test]
async fn test_double_subscribe_is_an_error() {
    let broker = InMemoryBroker::new();
    broker.subscribe("logs", AckMode::Manual).await.unwrap();

    let err = broker.subscribe("logs", AckMode::Manual).await.unwrap_err();
    assert!(matches!(err, BrokerError::AlreadySubscribed(q) if q == "logs"));
}

#[tokio::test]
async fn test_publish_without_subscriber_is_an_error() {
    let broker = InMemoryBroker::new();
    let err = broker.publish("logs", b"body").unwrap_err();
    assert!(matches!(err, BrokerError::UnknownQueue(q) if q == "logs"));
}

#[tokio::test]
async fn test_publish_after_subscription_dropped_is_an_error() {
    let broker = InMemoryBroker::new();
    let sub = broker.subscribe("logs", AckMode::Manual).await.unwrap();
    drop(sub);

    let err = broker.publish("logs", b"body").unwrap_err();
    assert!(matches!(err, BrokerError::ConnectionClosed));
}

#[tokio::test]
async fn test_auto_ack_settles_at_delivery_time() {
    let broker = InMemoryBroker::new();
    let mut sub = broker.subscribe("logs", AckMode::Auto).await.unwrap();

    broker.publish("logs", b"{}").unwrap();
    assert_eq!(broker.acked("logs"), 1);

    // Acking the settled token must not double-count
    let delivery = sub.recv().await.unwrap();
    delivery.ack.ack().unwrap();
    assert_eq!(broker.acked("logs"), 1);
}

#[tokio::test]
async fn test_queues_lists_active_subscriptions() {
    let broker = InMemoryBroker::new();
    broker.subscribe("logs.1", AckMode::Manual).await.unwrap();
    broker.subscribe("logs", AckMode::Manual).await.unwrap();
    broker.subscribe("logs.0", AckMode::Manual).await.unwrap();

    assert_eq!(broker.queues(), vec!["logs", "logs.0", "logs.1"]);
}
