mod test_ws_link_full_cycle;
