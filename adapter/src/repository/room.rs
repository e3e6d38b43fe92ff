use crate::store::{model::RoomRecord, SharedStore};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    store: SharedStore,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<Room> {
        let record = RoomRecord {
            room_id: RoomId::new(),
            name: event.name,
            capacity: event.capacity,
            equipment: event.equipment,
            floor: event.floor,
            image_url: event.image_url,
            created_at: Utc::now(),
        };
        let room = Room::from(record.clone());
        self.store
            .rooms_write()
            .await
            .insert(record.room_id, record);
        Ok(room)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rooms = self.store.rooms_read().await;
        let mut records: Vec<RoomRecord> = rooms.values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records.into_iter().map(Room::from).collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        Ok(self
            .store
            .rooms_read()
            .await
            .get(&room_id)
            .cloned()
            .map(Room::from))
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<Room> {
        let mut rooms = self.store.rooms_write().await;
        let record = rooms.get_mut(&event.room_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("room {} not found", event.room_id))
        })?;

        if let Some(name) = event.name {
            record.name = name;
        }
        if let Some(capacity) = event.capacity {
            record.capacity = capacity;
        }
        if let Some(equipment) = event.equipment {
            record.equipment = equipment;
        }
        if let Some(floor) = event.floor {
            record.floor = floor;
        }
        if let Some(image_url) = event.image_url {
            record.image_url = Some(image_url);
        }

        Ok(Room::from(record.clone()))
    }

    async fn delete(&self, event: DeleteRoom) -> AppResult<()> {
        // The ledger keeps history, so a room stays referenced by its
        // reservations forever; deleting it would orphan them.
        let referenced = self
            .store
            .reservations_read()
            .await
            .values()
            .any(|r| r.room_id == event.room_id);
        if referenced {
            return Err(AppError::UnprocessableEntity(format!(
                "room {} has reservations and cannot be deleted",
                event.room_id
            )));
        }

        let removed = self.store.rooms_write().await.remove(&event.room_id);
        if removed.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "room {} not found",
                event.room_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::id::UserId;
    use std::time::Duration;

    fn repo() -> RoomRepositoryImpl {
        RoomRepositoryImpl::new(SharedStore::new(Duration::from_secs(1)))
    }

    fn create_event() -> CreateRoom {
        CreateRoom {
            name: "Sala 101".into(),
            capacity: 8,
            equipment: vec!["TV".into(), "Whiteboard".into()],
            floor: 1,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn register_and_fetch_a_room() -> anyhow::Result<()> {
        let repo = repo();
        let created = repo.create(create_event()).await?;

        let all = repo.find_all().await?;
        assert_eq!(all.len(), 1);

        let found = repo.find_by_id(created.room_id).await?.unwrap();
        let Room {
            room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
        } = found;
        assert_eq!(room_id, created.room_id);
        assert_eq!(name, "Sala 101");
        assert_eq!(capacity, 8);
        assert_eq!(equipment, vec!["TV".to_string(), "Whiteboard".to_string()]);
        assert_eq!(floor, 1);
        assert_eq!(image_url, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_applies_only_the_provided_fields() -> anyhow::Result<()> {
        let repo = repo();
        let created = repo.create(create_event()).await?;

        let updated = repo
            .update(UpdateRoom {
                room_id: created.room_id,
                name: None,
                capacity: Some(12),
                equipment: None,
                floor: None,
                image_url: Some("https://img.example/sala101.png".into()),
                requested_user: UserId::new(),
            })
            .await?;

        assert_eq!(updated.name, "Sala 101");
        assert_eq!(updated.capacity, 12);
        assert_eq!(
            updated.image_url.as_deref(),
            Some("https://img.example/sala101.png")
        );
        Ok(())
    }

    #[tokio::test]
    async fn deleting_an_unknown_room_is_not_found() {
        let repo = repo();
        let err = repo
            .delete(DeleteRoom {
                room_id: RoomId::new(),
                requested_user: UserId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }
}
