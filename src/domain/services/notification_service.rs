// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::NotificationRequest;
use anyhow::Result;
use async_trait::async_trait;

/// 通知分发器特质
///
/// 核心消费的外部协作方接口。投递机制（推送/邮件）不在本核心
/// 范围内；分发失败不得阻塞或回滚升级认领。
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// 发送通知请求
    ///
    /// # 参数
    ///
    /// * `request` - 通知请求
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 发送成功
    /// * `Err(anyhow::Error)` - 发送失败，调用方仅记录日志
    async fn notify(&self, request: &NotificationRequest) -> Result<()>;
}
