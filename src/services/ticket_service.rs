use std::collections::HashSet;

use crate::entities::{TicketState, ticket_entity as tickets};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTicketRequest, TicketResponse};
use crate::services::DrawService;
use crate::utils::{next_ticket_numbers, validate_price, validate_ticket_number};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 单条 INSERT 的最大行数 (SQLite 绑定参数数量有限制)
const INSERT_CHUNK_SIZE: usize = 500;

#[derive(Clone)]
pub struct TicketService {
    pool: DatabaseConnection,
}

impl TicketService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 为期次批量生成彩票
    ///
    /// 逻辑:
    /// 1. 校验数量 (>= 1) 与单价 (> 0)，期次必须存在
    /// 2. 从该期次当前最大号码之后连续编号，补零到 4 位 (新期次为 "0001".."N")
    /// 3. 全部彩票在同一事务内插入，状态均为 AVAILABLE
    ///
    /// 同一期次的并发生成若号码冲突，由 (draw_id, number) 唯一索引拒绝，整批回滚。
    pub async fn generate_tickets(
        &self,
        draw_id: i64,
        count: u32,
        unit_price: Decimal,
    ) -> AppResult<Vec<TicketResponse>> {
        if count == 0 {
            return Err(AppError::ValidationError(
                "Count must be at least 1".to_string(),
            ));
        }
        validate_price(unit_price)?;

        let txn = self.pool.begin().await?;

        DrawService::find_draw(&txn, draw_id).await?;

        let existing: Vec<String> = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .select_only()
            .column(tickets::Column::Number)
            .into_tuple::<String>()
            .all(&txn)
            .await?;

        let numbers = next_ticket_numbers(existing.iter().map(String::as_str), count)?;

        let models: Vec<tickets::ActiveModel> = numbers
            .iter()
            .map(|number| tickets::ActiveModel {
                draw_id: Set(draw_id),
                number: Set(number.clone()),
                price: Set(unit_price),
                state: Set(TicketState::Available),
                customer_id: Set(None),
                ..Default::default()
            })
            .collect();

        for chunk in models.chunks(INSERT_CHUNK_SIZE) {
            tickets::Entity::insert_many(chunk.iter().cloned())
                .exec(&txn)
                .await
                .map_err(|e| {
                    AppError::on_constraint_violation(
                        e,
                        "Ticket numbers collided with a concurrent generation for this draw",
                    )
                })?;
        }

        let generated: HashSet<&str> = numbers.iter().map(String::as_str).collect();
        let created: Vec<TicketResponse> = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .order_by_asc(tickets::Column::Id)
            .all(&txn)
            .await?
            .into_iter()
            .filter(|t| generated.contains(t.number.as_str()))
            .map(Into::into)
            .collect();

        txn.commit().await?;

        log::info!(
            "Generated {} tickets for draw {draw_id} ({} .. {})",
            created.len(),
            numbers.first().map(String::as_str).unwrap_or_default(),
            numbers.last().map(String::as_str).unwrap_or_default(),
        );
        Ok(created)
    }

    /// 单张创建彩票
    ///
    /// 重复检查先于状态检查，保证 (draw_id, number) 已存在时总是返回 Conflict。
    /// 彩票只能通过售票变为 SOLD，因此创建时不接受 SOLD。
    pub async fn create_ticket(&self, request: CreateTicketRequest) -> AppResult<TicketResponse> {
        validate_ticket_number(&request.number)?;
        validate_price(request.price)?;

        DrawService::find_draw(&self.pool, request.draw_id).await?;

        let duplicate = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(request.draw_id))
            .filter(tickets::Column::Number.eq(request.number.as_str()))
            .one(&self.pool)
            .await?;
        if duplicate.is_some() {
            return Err(duplicate_ticket(request.draw_id, &request.number));
        }

        let state = request.state.unwrap_or(TicketState::Available);
        if state != TicketState::Available {
            return Err(AppError::ValidationError(
                "A ticket can only become SOLD through a sale".to_string(),
            ));
        }

        let model = tickets::ActiveModel {
            draw_id: Set(request.draw_id),
            number: Set(request.number.clone()),
            price: Set(request.price),
            state: Set(state),
            customer_id: Set(None),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_constraint_violation(e, duplicate_message(request.draw_id, &request.number))
        })?;

        Ok(model.into())
    }

    pub async fn get_ticket(&self, ticket_id: i64) -> AppResult<TicketResponse> {
        Ok(Self::find_ticket(&self.pool, ticket_id).await?.into())
    }

    pub async fn list_by_draw(&self, draw_id: i64) -> AppResult<Vec<TicketResponse>> {
        DrawService::find_draw(&self.pool, draw_id).await?;
        let list = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .order_by_asc(tickets::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_draw_and_state(
        &self,
        draw_id: i64,
        state: TicketState,
    ) -> AppResult<Vec<TicketResponse>> {
        DrawService::find_draw(&self.pool, draw_id).await?;
        let list = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .filter(tickets::Column::State.eq(state))
            .order_by_asc(tickets::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 客户当前持有的彩票 (即已购买的彩票)
    pub async fn list_by_customer(&self, customer_id: i64) -> AppResult<Vec<TicketResponse>> {
        let list = Self::find_by_customer(&self.pool, customer_id).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    // -----------------------------
    // 事务内辅助方法
    // -----------------------------

    pub(crate) async fn find_ticket<C>(conn: &C, ticket_id: i64) -> AppResult<tickets::Model>
    where
        C: ConnectionTrait,
    {
        tickets::Entity::find_by_id(ticket_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))
    }

    /// 售票前读取并锁定彩票行 (SELECT ... FOR UPDATE)，同一彩票的并发售票在此串行化；
    /// SQLite 不支持行锁，由数据库级写锁与 sales.ticket_id 唯一索引兜底
    pub(crate) async fn lock_ticket<C>(conn: &C, ticket_id: i64) -> AppResult<tickets::Model>
    where
        C: ConnectionTrait,
    {
        tickets::Entity::find_by_id(ticket_id)
            .lock_exclusive()
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))
    }

    pub(crate) async fn find_by_customer<C>(
        conn: &C,
        customer_id: i64,
    ) -> AppResult<Vec<tickets::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(tickets::Entity::find()
            .filter(tickets::Column::CustomerId.eq(customer_id))
            .order_by_asc(tickets::Column::Id)
            .all(conn)
            .await?)
    }

    /// AVAILABLE -> SOLD 并关联客户，仅供售票流程在事务内调用
    ///
    /// 条件更新 (where state = AVAILABLE)，未命中任何行说明彩票已售出，返回 Conflict。
    pub(crate) async fn mark_sold<C>(conn: &C, ticket_id: i64, customer_id: i64) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        let result = tickets::Entity::update_many()
            .set(tickets::ActiveModel {
                state: Set(TicketState::Sold),
                customer_id: Set(Some(customer_id)),
                ..Default::default()
            })
            .filter(tickets::Column::Id.eq(ticket_id))
            .filter(tickets::Column::State.eq(TicketState::Available))
            .exec(conn)
            .await?;

        if result.rows_affected != 1 {
            return Err(AppError::Conflict("Ticket already sold".to_string()));
        }
        Ok(())
    }
}

fn duplicate_message(draw_id: i64, number: &str) -> String {
    format!("Ticket {number} already exists in draw {draw_id}")
}

fn duplicate_ticket(draw_id: i64, number: &str) -> AppError {
    AppError::Conflict(duplicate_message(draw_id, number))
}
