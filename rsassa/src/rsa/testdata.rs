//! 测试用的固定密钥

use crate::rsa::PrivateKey;
use num_bigint::BigUint;
use num_traits::Num;

/// 1024-bits, e = 0x10001
pub(crate) fn key_1024() -> PrivateKey {
    let hex = |s: &str| BigUint::from_str_radix(s, 16).unwrap();
    PrivateKey::from_components(
        hex("a5e198f3b1619971e077ce9186615d47cc45340d7d1f8c4fa8f998884f934f62513c91c7b796f508b4090fc285c0c5ff57d722b4044d5f25f4dcd397b8360f3f440fc96473ec4ec9f39bf9eacc94d858f357b6ca19c239041f29153cea96a42c0ce032c5c6e65a328983268344798376492ed5c2d27392176db8920099e8ac0d"),
        BigUint::from(0x10001u32),
        hex("77db0681e603c83450e5201b64064bb909ee62caf04270464aa875bee008674e79b612fb443acdb7c925d6fe4d585977c3074e2ad604f59fde4a0494d6643124f245132b34b1ebbe86d6224a003af425d26300cdb1089bef63f44c3d9ea34143045a3e1ee73f917cbeb7b96641a539b3f777cd081d69e9fbe0f7b081bd0a361d"),
        hex("c5d940adfaee20d634f1aed7768dc40b050873f75e4d2eb192eba01db5896a90c4362c7a3f83cd3116aebc178dcb00cb321d760d9c9edfe4fb191f6c169b8c5b"),
        hex("d6a304998f9c9c81afdc04d39adab29ef4c98574cfa73464bee5dc16c36e1d95b2276e0486f49020f5d06b7dc524032c3a2929f2f25c7b482e52bc835861b5b7"),
    )
    .unwrap()
}

/// 1024-bits, e = 0x10001, RSA Laboratories pss-int.txt (PKCS #1 v2.1)中的密钥
pub(crate) fn key_pss_int() -> PrivateKey {
    let hex = |s: &str| BigUint::from_str_radix(s, 16).unwrap();
    PrivateKey::from_components(
        hex("a2ba40ee07e3b2bd2f02ce227f36a195024486e49c19cb41bbbdfbba98b22b0e577c2eeaffa20d883a76e65e394c69d4b3c05a1e8fadda27edb2a42bc000fe888b9b32c22d15add0cd76b3e7936e19955b220dd17d4ea904b1ec102b2e4de7751222aa99151024c7cb41cc5ea21d00eeb41f7c800834d2c6e06bce3bce7ea9a5"),
        BigUint::from(0x10001u32),
        hex("50e2c3e38d886110288dfc68a9533e7e12e27d2aa56d2cdb3fb6efa990bcff29e1d2987fb711962860e7391b1ce01ebadb9e812d2fbdfaf25df4ae26110a6d7a26f0b810f54875e17dd5c9fb6d641761245b81e79f8c88f0e55a6dcd5f133abd35f8f4ec80adf1bf86277a582894cb6ebcd2162f1c7534f1f4947b129151b71"),
        hex("d17f655bf27c8b16d35462c905cc04a26f37e2a67fa9c0ce0dced472394a0df743fe7f929e378efdb368eddff453cf007af6d948e0ade757371f8a711e278f6b"),
        hex("c6d92b6fee7414d1358ce1546fb62987530b90bd15e0f14963a5e2635adb69347ec0c01b2ab1763fd8ac1a592fb22757463a982425bb97a3a437c5bf86d03f2f"),
    )
    .unwrap()
}

/// 1025-bits, e = 65537, emLen = k - 1
pub(crate) fn key_1025() -> PrivateKey {
    let hex = |s: &str| BigUint::from_str_radix(s, 16).unwrap();
    PrivateKey::from_primes(
        hex("1b2535293747b28a5bf007f517d3e9ccb1f610b7b2e6c486ee827c12179a8df9a7e72daa642e094e6e34a20027ddf98eec82d2a569f3eae94982b72daa3bb9009"),
        hex("ea6ddf46c0810ab1ea2c34f4b76f8e0d837eab23240300090c4b27e9b916a8e1dfdbde483f2a3ef7b89edd3b7b98f4b51c3f80ece85842376ddd2dd55c614567"),
        BigUint::from(65537u32),
    )
    .unwrap()
}

/// 512-bits, e = 65537
pub(crate) fn key_512() -> PrivateKey {
    let dec = |s: &str| BigUint::from_str_radix(s, 10).unwrap();
    PrivateKey::from_components(
        dec("9353930466774385905609975137998169297361893554149986716853295022578535724979677252958524466350471210367835187480748268864277464700638583474144061408845077"),
        BigUint::from(65537u32),
        dec("7266398431328116344057699379749222532279343923819063639497049039389899328538543087657733766554155839834519529439851673014800261285757759040931985506583861"),
        dec("98920366548084643601728869055592650835572950932266967461790948584315647051443"),
        dec("94560208308847015747498523884063394671606671904944666360068158221458669711639"),
    )
    .unwrap()
}

/// 2048-bits, e = 3
pub(crate) fn key_2048() -> PrivateKey {
    let dec = |s: &str| BigUint::from_str_radix(s, 10).unwrap();
    PrivateKey::from_components(
        dec("14314132931241006650998084889274020608918049032671858325988396851334124245188214251956198731333464217832226406088020736932173064754214329009979944037640912127943488972644697423190955557435910767690712778463524983667852819010259499695177313115447116110358524558307947613422897787329221478860907963827160223559690523660574329011927531289655711860504630573766609239332569210831325633840174683944553667352219670930408593321661375473885147973879086994006440025257225431977751512374815915392249179976902953721486040787792801849818254465486633791826766873076617116727073077821584676715609985777563958286637185868165868520557"),
        BigUint::from(3u32),
        dec("9542755287494004433998723259516013739278699355114572217325597900889416163458809501304132487555642811888150937392013824621448709836142886006653296025093941418628992648429798282127303704957273845127141852309016655778568546006839666463451542076964744073572349705538631742281931858219480985907271975884773482372966847639853897890615456605598071088189838676728836833012254065983259638538107719766738032720239892094196108713378822882383694456030043492571063441943847195939549773271694647657549658603365629458610273821292232646334717612674519997533901052790334279661754176490593041941863932308687197618671528035670452762731"),
        dec("130903255182996722426771613606077755295583329135067340152947172868415809027537376306193179624298874215608270802054347609836776473930072411958753044562214537013874103802006369634761074377213995983876788718033850153719421695468704276694983032644416930879093914927146648402139231293035971427838068945045019075433"),
        dec("109348945610485453577574767652527472924289229538286649661240938988020367005475727988253438647560958573506159449538793540472829815903949343191091817779240101054552748665267574271163617694640513549693841337820602726596756351006149518830932261246698766355347898158548465400674856021497190430791824869615170301029"),
    )
    .unwrap()
}
