//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, a before returning false stopping the chain, Reply ending the handle
//! phase and reaching every after, Ignore/Continue falling through to later handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dbot_core::{Chat, Handler, HandlerResponse, Message, MessageContent, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: MessageContent::Text(content.to_string()),
        created_at: Utc::now(),
    }
}

/// **Test: An empty chain returns Continue.**
#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());

    let result = chain.handle(&create_test_message("hi")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
}

/// **Test: before returning false stops the chain; handle is not run.**
///
/// **Setup:** One blocking handler (before returns false), one counting handler.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Stop; handle_count=0.
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(CountingHandler::new(
            handle_count.clone(),
            HandlerResponse::Continue,
        )));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Ignore falls through; the first Reply ends the handle phase.**
///
/// **Setup:** Ignore handler, Reply handler, then a handler that must not run.
/// **Expected:** result is the Reply; third handler's handle_count=0.
#[tokio::test]
async fn test_reply_ends_handle_phase_after_ignore() {
    let ignored = Arc::new(AtomicUsize::new(0));
    let replied = Arc::new(AtomicUsize::new(0));
    let unreached = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler::new(
            ignored.clone(),
            HandlerResponse::Ignore,
        )))
        .add_handler(Arc::new(CountingHandler::new(
            replied.clone(),
            HandlerResponse::Reply("Перевод (ru → en):\n\nHello".to_string()),
        )))
        .add_handler(Arc::new(CountingHandler::new(
            unreached.clone(),
            HandlerResponse::Continue,
        )));

    let result = chain.handle(&create_test_message("Привет")).await.unwrap();

    assert_eq!(
        result,
        HandlerResponse::Reply("Перевод (ru → en):\n\nHello".to_string())
    );
    assert_eq!(ignored.load(Ordering::SeqCst), 1);
    assert_eq!(replied.load(Ordering::SeqCst), 1);
    assert_eq!(unreached.load(Ordering::SeqCst), 0);
}

/// **Test: Handlers run before in order and after in reverse; after sees the final response.**
///
/// **Setup:** Two recording handlers; the second replies.
/// **Expected:** before_first, before_second, handle_first, handle_second, after_second(reply), after_first(reply).
#[tokio::test]
async fn test_handlers_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            reply: false,
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            reply: true,
            order: order.clone(),
        }));

    chain.handle(&create_test_message("test")).await.unwrap();

    let executed = order.lock().unwrap();
    assert_eq!(
        *executed,
        vec![
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second_reply",
            "after_first_reply",
        ]
    );
}

// --- Helpers used by tests ---

struct CountingHandler {
    handle_count: Arc<AtomicUsize>,
    response: HandlerResponse,
}

impl CountingHandler {
    fn new(handle_count: Arc<AtomicUsize>, response: HandlerResponse) -> Self {
        Self {
            handle_count,
            response,
        }
    }
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

struct OrderHandler {
    name: &'static str,
    reply: bool,
    order: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Handler for OrderHandler {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.order.lock().unwrap().push(format!("before_{}", self.name));
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.order.lock().unwrap().push(format!("handle_{}", self.name));
        if self.reply {
            Ok(HandlerResponse::Reply("done".to_string()))
        } else {
            Ok(HandlerResponse::Continue)
        }
    }

    async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
        let suffix = match response {
            HandlerResponse::Reply(_) => "reply",
            _ => "other",
        };
        self.order
            .lock()
            .unwrap()
            .push(format!("after_{}_{}", self.name, suffix));
        Ok(())
    }
}
