fn main() {
    cowpoke_combat::game::run();
}
