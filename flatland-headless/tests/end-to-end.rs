#[test]
fn trycmd_tests() {
    let tc = trycmd::TestCases::new();
    tc.case("tests/end-to-end/*.toml");
    tc.run();
}
