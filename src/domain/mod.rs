// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod countdown;
pub mod models;
pub mod repositories;
pub mod services;
