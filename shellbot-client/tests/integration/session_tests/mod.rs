mod test_joined_installs_robot_rules;
mod test_missing_room_is_polled;
mod test_room_found_joins_once;
mod test_room_removed_ends_session;
