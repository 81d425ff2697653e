use crate::error::{Result, ServerError};
use crate::push::types::{DispatchTarget, Token};
use async_trait::async_trait;
use sqlx::PgPool;

/// Token Source（令牌来源接口）
///
/// 将派发目标解析为当前有效的设备令牌集合。
/// 空结果是合法的"无接收者"，不是错误；存储故障以 Database 错误向上传播
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn resolve(&self, target: &DispatchTarget) -> Result<Vec<Token>>;
}

/// Postgres 令牌仓库
///
/// - 管理员令牌表：ordercast_admin_tokens（每台管理端设备一行）
/// - 用户令牌表：ordercast_user_tokens（每个用户至多一个已注册令牌）
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn all_tokens(&self, table: &str) -> Result<Vec<Token>> {
        // 表名来自固定集合，不是外部输入
        let query = format!("SELECT token FROM {} WHERE token IS NOT NULL", table);
        let tokens: Vec<String> = sqlx::query_scalar(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ServerError::Database(format!("查询 {} 失败: {}", table, e)))?;
        Ok(tokens)
    }

    async fn user_token(&self, user_id: &str) -> Result<Option<Token>> {
        let token: Option<String> = sqlx::query_scalar(
            r#"
            SELECT token
            FROM ordercast_user_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServerError::Database(format!("查询用户令牌失败: {}", e)))?;
        Ok(token)
    }
}

#[async_trait]
impl TokenSource for PgTokenRepository {
    async fn resolve(&self, target: &DispatchTarget) -> Result<Vec<Token>> {
        match target {
            DispatchTarget::AllAdmins => self.all_tokens("ordercast_admin_tokens").await,
            DispatchTarget::AllUsers => self.all_tokens("ordercast_user_tokens").await,
            DispatchTarget::SingleUser(user_id) => {
                Ok(self.user_token(user_id).await?.into_iter().collect())
            }
        }
    }
}
