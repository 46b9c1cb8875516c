//! Friend list endpoint.

use axum::Json;

use qff_finder::{TargetIndex, friend_name};

use crate::dto::FriendsResponse;

/// GET /api/friends - Names in index order.
pub async fn list_friends() -> Json<FriendsResponse> {
    let friends: Vec<String> = TargetIndex::all().map(friend_name).collect();
    Json(FriendsResponse {
        count: friends.len(),
        friends,
    })
}
