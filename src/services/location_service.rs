use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    entity::locations::{Column, Entity as Locations},
    error::AppResult,
    models::Location,
    response::{ApiResponse, ListData, Meta},
    state::AppState,
};

pub async fn list_locations(state: &AppState) -> AppResult<ApiResponse<ListData<Location>>> {
    let items: Vec<Location> = Locations::find()
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Location::from)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::list("Locations", items, meta))
}
