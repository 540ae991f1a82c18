// tests/registry_tests.rs
mod common;

use common::*;
use storefront_flow::{ContextData, FlowError, FlowRegistry, Pipeline, PipelineControl, PipelineResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct CreateDraft {
  name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct UpdateDraft {
  revision: i32,
}

#[tokio::test]
async fn test_registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut create = Pipeline::<CreateDraft, TestError>::new(&[("create", false, None)]);
  create.on_step("create", |ctx: ContextData<CreateDraft>| {
    Box::pin(async move {
      ctx.write().name = "created".to_string();
      Ok::<PipelineControl, FlowError>(PipelineControl::Continue)
    })
  });
  registry.register_pipeline(create);

  let mut update = Pipeline::<UpdateDraft, TestError>::new(&[("update", false, None)]);
  update.on_step("update", |ctx: ContextData<UpdateDraft>| {
    Box::pin(async move {
      ctx.write().revision += 1;
      Ok::<PipelineControl, FlowError>(PipelineControl::Continue)
    })
  });
  registry.register_pipeline(update);

  assert!(registry.is_registered::<CreateDraft>());
  assert!(registry.is_registered::<UpdateDraft>());

  let create_ctx = ContextData::new(CreateDraft::default());
  assert_eq!(registry.run(create_ctx.clone()).await, Ok(PipelineResult::Completed));
  assert_eq!(create_ctx.read().name, "created");

  let update_ctx = ContextData::new(UpdateDraft { revision: 4 });
  assert_eq!(registry.run(update_ctx.clone()).await, Ok(PipelineResult::Completed));
  assert_eq!(update_ctx.read().revision, 5);
}

#[tokio::test]
async fn test_registry_rejects_unregistered_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  #[derive(Debug, Default)]
  struct Orphan;

  let result = registry.run(ContextData::new(Orphan)).await;

  match result {
    Err(TestError::Flow(s)) => {
      assert!(s.contains("PipelineNotRegistered"));
      assert!(s.contains("Orphan"));
    }
    other => panic!("Expected PipelineNotRegistered, got {:?}", other),
  }
}

#[tokio::test]
async fn test_registry_returns_handler_error_unchanged() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut pipeline = Pipeline::<CreateDraft, TestError>::new(&[("reject", false, None)]);
  pipeline.on_step("reject", |_ctx: ContextData<CreateDraft>| {
    Box::pin(async move { Err(TestError::Handler("name is required".to_string())) })
  });
  registry.register_pipeline(pipeline);

  let result = registry.run(ContextData::new(CreateDraft::default())).await;
  assert_eq!(result, Err(TestError::Handler("name is required".to_string())));
}

#[tokio::test]
async fn test_later_registration_replaces_earlier_one() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  for label in ["first", "second"] {
    let mut pipeline = Pipeline::<CreateDraft, TestError>::new(&[("name", false, None)]);
    pipeline.on_step("name", move |ctx: ContextData<CreateDraft>| {
      Box::pin(async move {
        ctx.write().name = label.to_string();
        Ok::<PipelineControl, FlowError>(PipelineControl::Continue)
      })
    });
    registry.register_pipeline(pipeline);
  }

  let ctx = ContextData::new(CreateDraft::default());
  registry.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().name, "second");
}

#[tokio::test]
async fn test_registry_with_flow_error_as_application_error() {
  setup_tracing();
  let registry: FlowRegistry = FlowRegistry::default();

  let mut pipeline = Pipeline::<UpdateDraft, FlowError>::new(&[("bump", false, None), ("fail", false, None)]);
  pipeline.on_step("bump", |ctx: ContextData<UpdateDraft>| {
    Box::pin(async move {
      ctx.write().revision = 1;
      Ok::<PipelineControl, FlowError>(PipelineControl::Continue)
    })
  });
  pipeline.on_step("fail", |_ctx: ContextData<UpdateDraft>| {
    Box::pin(async move { Err(anyhow::anyhow!("store unavailable")) })
  });
  registry.register_pipeline(pipeline);

  let ctx = ContextData::new(UpdateDraft::default());
  let result = registry.run(ctx.clone()).await;

  match result {
    Err(FlowError::HandlerError { source }) => assert_eq!(source.to_string(), "store unavailable"),
    other => panic!("Expected FlowError::HandlerError, got {:?}", other),
  }
  assert_eq!(ctx.read().revision, 1);
}
