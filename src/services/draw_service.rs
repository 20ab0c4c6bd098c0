use crate::entities::{TicketState, draw_entity as draws, ticket_entity as tickets};
use crate::error::{AppError, AppResult};
use crate::models::{CreateDrawRequest, DrawResponse};
use crate::utils::require_non_blank;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_draw(&self, request: CreateDrawRequest) -> AppResult<DrawResponse> {
        require_non_blank(&request.name, "name")?;

        let model = draws::ActiveModel {
            name: Set(request.name),
            draw_date: Set(request.draw_date),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Draw created: id={} name={}", model.id, model.name);
        Ok(model.into())
    }

    pub async fn list_draws(&self) -> AppResult<Vec<DrawResponse>> {
        let list = draws::Entity::find()
            .order_by_asc(draws::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_draw(&self, draw_id: i64) -> AppResult<DrawResponse> {
        Ok(Self::find_draw(&self.pool, draw_id).await?.into())
    }

    /// 删除期次 (显式级联):
    /// 1. 已有售出彩票的期次拒绝删除 (销售记录不可删除)
    /// 2. 同一事务内先删彩票，再删期次
    ///
    /// 返回被删除的彩票数量
    pub async fn delete_draw(&self, draw_id: i64) -> AppResult<u64> {
        let txn = self.pool.begin().await?;

        Self::find_draw(&txn, draw_id).await?;

        let sold = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .filter(tickets::Column::State.eq(TicketState::Sold))
            .count(&txn)
            .await?;
        if sold > 0 {
            return Err(AppError::Conflict(format!(
                "Draw has {sold} sold tickets and cannot be deleted"
            )));
        }

        let deleted = tickets::Entity::delete_many()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::on_constraint_violation(e, "Draw tickets are referenced by sales"))?;

        draws::Entity::delete_by_id(draw_id).exec(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Draw deleted: id={draw_id} tickets_removed={}",
            deleted.rows_affected
        );
        Ok(deleted.rows_affected)
    }

    /// 读取期次，不存在返回 NotFound (事务内外通用)
    pub(crate) async fn find_draw<C>(conn: &C, draw_id: i64) -> AppResult<draws::Model>
    where
        C: ConnectionTrait,
    {
        draws::Entity::find_by_id(draw_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw {draw_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TicketService;
    use crate::testing::{draw_request, setup_db};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_and_list_draws() {
        let pool = setup_db().await;
        let service = DrawService::new(pool);

        let first = service.create_draw(draw_request("Sorteo 1")).await.unwrap();
        let second = service.create_draw(draw_request("Sorteo 2")).await.unwrap();

        let list = service.list_draws().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, first.id);
        assert_eq!(list[1].name, "Sorteo 2");

        let fetched = service.get_draw(second.id).await.unwrap();
        assert_eq!(fetched.draw_date, second.draw_date);
    }

    #[tokio::test]
    async fn test_create_draw_requires_name() {
        let pool = setup_db().await;
        let service = DrawService::new(pool);

        let err = service.create_draw(draw_request("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_get_missing_draw() {
        let pool = setup_db().await;
        let service = DrawService::new(pool);

        let err = service.get_draw(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_draw_cascades_to_tickets() {
        let pool = setup_db().await;
        let draws = DrawService::new(pool.clone());
        let tickets = TicketService::new(pool);

        let draw = draws.create_draw(draw_request("Sorteo")).await.unwrap();
        tickets.generate_tickets(draw.id, 5, dec!(10000)).await.unwrap();

        let removed = draws.delete_draw(draw.id).await.unwrap();
        assert_eq!(removed, 5);
        assert!(matches!(
            draws.get_draw(draw.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            tickets.list_by_draw(draw.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
