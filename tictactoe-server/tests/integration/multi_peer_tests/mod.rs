mod test_concurrent_joins;
mod test_join_assigns_sides;
mod test_waiting_room_expiry;
