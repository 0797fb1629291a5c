//! In-memory fakes for the store and notifier contracts.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use seathub_core::error::AppError;
use seathub_core::events::session::SessionCommand;
use seathub_core::result::AppResult;
use seathub_core::traits::notifier::Notifier;
use seathub_core::types::id::{ConnectionId, MemberId, SeatNumber};
use seathub_entity::member::Member;
use seathub_entity::seat::SeatRow;

use crate::store::{MemberStore, SeatStore};

/// Build a member with the given id and balance.
pub fn member(id: i64, remaining_seconds: i64) -> Member {
    Member {
        id: MemberId(id),
        username: format!("member-{id}"),
        remaining_seconds,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Seat store over an in-memory row map, recording every write.
#[derive(Debug, Default)]
pub struct MockSeatStore {
    rows: Mutex<BTreeMap<SeatNumber, SeatRow>>,
    balances: Mutex<BTreeMap<MemberId, i64>>,
    assignment_writes: Mutex<Vec<(SeatNumber, Option<i64>, Option<MemberId>)>>,
    tick_writes: Mutex<Vec<(SeatNumber, MemberId, i64)>>,
    fail_list: AtomicBool,
    fail_writes: AtomicBool,
    fail_tick_for: Mutex<Option<SeatNumber>>,
}

impl MockSeatStore {
    pub fn with_rows(rows: Vec<SeatRow>) -> Self {
        let store = Self::default();
        {
            let mut map = store.rows.lock().expect("rows lock");
            for row in rows {
                map.insert(row.seat_number, row);
            }
        }
        store
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_tick_for(&self, seat: SeatNumber) {
        *self.fail_tick_for.lock().expect("flag lock") = Some(seat);
    }

    /// Current persisted row for a seat.
    pub fn row(&self, seat: SeatNumber) -> Option<SeatRow> {
        self.rows.lock().expect("rows lock").get(&seat).cloned()
    }

    /// Last balance mirrored to the member table during ticks.
    pub fn member_balance(&self, member: MemberId) -> Option<i64> {
        self.balances
            .lock()
            .expect("balances lock")
            .get(&member)
            .copied()
    }

    pub fn assignment_write_count(&self) -> usize {
        self.assignment_writes.lock().expect("writes lock").len()
    }

    pub fn tick_write_count(&self) -> usize {
        self.tick_writes.lock().expect("ticks lock").len()
    }

    pub fn tick_writes(&self) -> Vec<(SeatNumber, MemberId, i64)> {
        self.tick_writes.lock().expect("ticks lock").clone()
    }
}

#[async_trait]
impl SeatStore for MockSeatStore {
    async fn list_all(&self) -> AppResult<Vec<SeatRow>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AppError::database("seat fetch refused"));
        }
        Ok(self.rows.lock().expect("rows lock").values().cloned().collect())
    }

    async fn update_assignment(
        &self,
        seat: SeatNumber,
        usage_time: Option<i64>,
        occupant: Option<MemberId>,
    ) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("seat write refused"));
        }
        self.assignment_writes
            .lock()
            .expect("writes lock")
            .push((seat, usage_time, occupant));

        let mut rows = self.rows.lock().expect("rows lock");
        let row = rows
            .get_mut(&seat)
            .ok_or_else(|| AppError::database(format!("no row for seat {seat}")))?;
        row.usage_time = usage_time;
        row.user_id = occupant;
        Ok(())
    }

    async fn persist_tick(
        &self,
        seat: SeatNumber,
        occupant: MemberId,
        remaining_seconds: i64,
    ) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst)
            || *self.fail_tick_for.lock().expect("flag lock") == Some(seat)
        {
            return Err(AppError::database("tick write refused"));
        }
        self.tick_writes
            .lock()
            .expect("ticks lock")
            .push((seat, occupant, remaining_seconds));

        let mut rows = self.rows.lock().expect("rows lock");
        let row = rows
            .get_mut(&seat)
            .ok_or_else(|| AppError::database(format!("no row for seat {seat}")))?;
        row.usage_time = Some(remaining_seconds);
        self.balances
            .lock()
            .expect("balances lock")
            .insert(occupant, remaining_seconds);
        Ok(())
    }
}

/// Member store over a fixed in-memory set, counting lookups.
#[derive(Debug, Default)]
pub struct MockMemberStore {
    members: Mutex<BTreeMap<MemberId, Member>>,
    lookups: Mutex<usize>,
}

impl MockMemberStore {
    pub fn with_members(members: Vec<Member>) -> Self {
        let store = Self::default();
        {
            let mut map = store.members.lock().expect("members lock");
            for member in members {
                map.insert(member.id, member);
            }
        }
        store
    }

    pub fn lookup_count(&self) -> usize {
        *self.lookups.lock().expect("lookups lock")
    }
}

#[async_trait]
impl MemberStore for MockMemberStore {
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        *self.lookups.lock().expect("lookups lock") += 1;
        Ok(self.members.lock().expect("members lock").get(&id).cloned())
    }
}

/// Notifier that records every delivery attempt.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<(ConnectionId, SessionCommand)>>,
    fail: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(ConnectionId, SessionCommand)> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, connection: ConnectionId, command: SessionCommand) -> AppResult<()> {
        self.sent
            .lock()
            .expect("sent lock")
            .push((connection, command));
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::notification("connection refused the message"));
        }
        Ok(())
    }
}
