use super::{Handler, HandlerError, PayloadLogger, handler_fn};
use crate::consumer::MessageType;
use crate::consumer::codec::{Payload, decode};

#[tokio::test]
async fn test_payload_logger_accepts_any_payload() {
    let payload = decode(br#"{"uuid":"u-1","event":"log_line"}"#).unwrap();
    PayloadLogger
        .handle(MessageType::Log, payload)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_async_closure_acts_as_handler() {
    let handler = handler_fn(|kind: MessageType, payload: Payload| async move {
        assert_eq!(kind, MessageType::Route);
        assert_eq!(payload.len(), 1);
        Ok::<(), HandlerError>(())
    });
    let payload = decode(br#"{"uuid":"u-2"}"#).unwrap();
    handler.handle(MessageType::Route, payload).await.unwrap();
}
