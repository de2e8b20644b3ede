fn main() {
    ledge_runner::game::run();
}
