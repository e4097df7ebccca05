use super::macros::op_marker;

op_marker!(init, Init, "init", [Plan => "plan", Migrate => "migrate"]);

op_marker!(sync, SyncOp, "sync", [
    FetchRemote => "fetch_remote",
    ReadAsset => "read_asset",
    Handoff => "handoff",
    Plan => "plan",
]);

op_marker!(records, Records, "records", [List => "list"]);
