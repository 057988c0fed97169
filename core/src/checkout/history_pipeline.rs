// core/src/checkout/history_pipeline.rs

use super::contexts::OrderHistoryCtxData;
use crate::error::ShopError;
use crate::flow::{ContextData, Flows, Pipeline, PipelineControl};
use tracing::{event, Level};

pub fn build_order_history_pipeline() -> Pipeline<OrderHistoryCtxData> {
  let mut p = Pipeline::<OrderHistoryCtxData>::new(&[("load_orders", false)]);

  p.on_root("load_orders", |ctx: ContextData<OrderHistoryCtxData>| {
    Box::pin(async move {
      let (reader, user_id) = {
        let guard = ctx.read();
        (guard.reader.clone(), guard.user_id)
      };

      let orders = reader.get_orders_for_user(user_id).await?;
      event!(Level::DEBUG, user_id, count = orders.len(), "Order history loaded.");

      ctx.write().orders = orders;
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn register_order_history_pipeline(flows: &Flows) {
  flows.register_pipeline(build_order_history_pipeline());
  tracing::info!("Order history pipeline registered.");
}
