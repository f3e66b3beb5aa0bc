/*
 * Responsibility
 * - middleware の公開インターフェース
 * - group_access: 認可 filter、http: transport 共通 layer
 */
pub mod group_access;
pub mod http;
