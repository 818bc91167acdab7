// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod escalation_service;
pub mod notification_service;
pub mod task_timer_service;
